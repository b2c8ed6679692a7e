//! The static menu catalog.
//!
//! The menu is fixed in-process data: four categories, thirteen items, two
//! pickup locations. There is no inventory and no admin surface; editing the
//! menu means editing this file.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use bento_bop_core::{MenuItemId, Price};

/// Menu category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Bento,
    Sides,
    Drinks,
    Desserts,
}

impl CategoryId {
    /// URL slug for the category tab.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bento => "bento",
            Self::Sides => "sides",
            Self::Drinks => "drinks",
            Self::Desserts => "desserts",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bento => "Bento Boxes",
            Self::Sides => "Sides",
            Self::Drinks => "Drinks",
            Self::Desserts => "Desserts",
        }
    }

    /// Emoji icon shown on the category tab.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Bento => "\u{1f371}",
            Self::Sides => "\u{1f359}",
            Self::Drinks => "\u{1f964}",
            Self::Desserts => "\u{1f370}",
        }
    }

    /// All categories in menu display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Bento, Self::Sides, Self::Drinks, Self::Desserts]
    }
}

impl std::str::FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bento" => Ok(Self::Bento),
            "sides" => Ok(Self::Sides),
            "drinks" => Ok(Self::Drinks),
            "desserts" => Ok(Self::Desserts),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// A single orderable menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub category: CategoryId,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub image: &'static str,
}

/// A store location offering pickup.
#[derive(Debug, Clone)]
pub struct PickupLocation {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub hours: &'static str,
}

static MENU_ITEMS: LazyLock<Vec<MenuItem>> = LazyLock::new(|| {
    vec![
        MenuItem {
            id: MenuItemId::new(1),
            category: CategoryId::Bento,
            name: "Classic Chicken Bento",
            description: "Grilled chicken, rice, pickled veggies, sesame dressing",
            price: Price::from_cents(1299),
            image: "/static/images/chicken-bento.jpg",
        },
        MenuItem {
            id: MenuItemId::new(2),
            category: CategoryId::Bento,
            name: "Teriyaki Salmon Bento",
            description: "Glazed salmon, sticky rice, edamame, miso soup",
            price: Price::from_cents(1499),
            image: "/static/images/salmon-bento.jpg",
        },
        MenuItem {
            id: MenuItemId::new(3),
            category: CategoryId::Bento,
            name: "Spicy Tofu Bento",
            description: "Crispy tofu, brown rice, kimchi, spicy mayo",
            price: Price::from_cents(1199),
            image: "/static/images/tofu-bento.jpg",
        },
        MenuItem {
            id: MenuItemId::new(4),
            category: CategoryId::Bento,
            name: "Beef Bulgogi Bento",
            description: "Marinated beef, rice, cucumber salad, gochujang",
            price: Price::from_cents(1399),
            image: "/static/images/beef-bento.jpg",
        },
        MenuItem {
            id: MenuItemId::new(5),
            category: CategoryId::Sides,
            name: "Gyoza",
            description: "Pan-fried dumplings (5pcs)",
            price: Price::from_cents(599),
            image: "/static/images/gyoza.jpg",
        },
        MenuItem {
            id: MenuItemId::new(6),
            category: CategoryId::Sides,
            name: "Edamame",
            description: "Steamed young soybeans with sea salt",
            price: Price::from_cents(499),
            image: "/static/images/edamame.jpg",
        },
        MenuItem {
            id: MenuItemId::new(7),
            category: CategoryId::Sides,
            name: "Miso Soup",
            description: "Traditional Japanese soup with tofu",
            price: Price::from_cents(399),
            image: "/static/images/miso-soup.jpg",
        },
        MenuItem {
            id: MenuItemId::new(8),
            category: CategoryId::Drinks,
            name: "Green Tea",
            description: "Hot or iced",
            price: Price::from_cents(249),
            image: "/static/images/green-tea.jpg",
        },
        MenuItem {
            id: MenuItemId::new(9),
            category: CategoryId::Drinks,
            name: "Ramune Soda",
            description: "Japanese marble soda",
            price: Price::from_cents(349),
            image: "/static/images/ramune.jpg",
        },
        MenuItem {
            id: MenuItemId::new(10),
            category: CategoryId::Drinks,
            name: "Iced Matcha Latte",
            description: "Creamy matcha with oat milk",
            price: Price::from_cents(499),
            image: "/static/images/matcha-latte.jpg",
        },
        MenuItem {
            id: MenuItemId::new(11),
            category: CategoryId::Desserts,
            name: "Mochi Ice Cream",
            description: "Assorted flavors (3pcs)",
            price: Price::from_cents(599),
            image: "/static/images/mochi.jpg",
        },
        MenuItem {
            id: MenuItemId::new(12),
            category: CategoryId::Desserts,
            name: "Dorayaki",
            description: "Red bean pancake sandwich",
            price: Price::from_cents(449),
            image: "/static/images/dorayaki.jpg",
        },
        MenuItem {
            id: MenuItemId::new(13),
            category: CategoryId::Desserts,
            name: "Matcha Cheesecake",
            description: "Creamy Japanese-style cheesecake",
            price: Price::from_cents(699),
            image: "/static/images/matcha-cheesecake.jpg",
        },
    ]
});

static PICKUP_LOCATIONS: LazyLock<Vec<PickupLocation>> = LazyLock::new(|| {
    vec![
        PickupLocation {
            id: "sukhumvit",
            name: "Bento Bop Sukhumvit",
            address: "123 Sukhumvit Road, Soi 23",
            city: "Bangkok, 10110",
            hours: "10:00 - 21:00",
        },
        PickupLocation {
            id: "siam",
            name: "Bento Bop Siam",
            address: "456 Rama 1 Road",
            city: "Bangkok, 10330",
            hours: "11:00 - 22:00",
        },
    ]
});

/// All menu items in display order.
#[must_use]
pub fn menu_items() -> &'static [MenuItem] {
    &MENU_ITEMS
}

/// Items belonging to the given category, in display order.
#[must_use]
pub fn items_in_category(category: CategoryId) -> Vec<&'static MenuItem> {
    MENU_ITEMS
        .iter()
        .filter(|item| item.category == category)
        .collect()
}

/// Look up a menu item by id.
#[must_use]
pub fn find_item(id: MenuItemId) -> Option<&'static MenuItem> {
    MENU_ITEMS.iter().find(|item| item.id == id)
}

/// All pickup locations.
#[must_use]
pub fn pickup_locations() -> &'static [PickupLocation] {
    &PICKUP_LOCATIONS
}

/// Look up a pickup location by id.
#[must_use]
pub fn find_location(id: &str) -> Option<&'static PickupLocation> {
    PICKUP_LOCATIONS.iter().find(|location| location.id == id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_has_thirteen_items() {
        assert_eq!(menu_items().len(), 13);
    }

    #[test]
    fn test_item_ids_are_unique() {
        let mut ids: Vec<i32> = menu_items().iter().map(|i| i.id.as_i32()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), menu_items().len());
    }

    #[test]
    fn test_every_category_has_items() {
        for category in CategoryId::all() {
            assert!(
                !items_in_category(category).is_empty(),
                "category {} has no items",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_find_item() {
        let item = find_item(MenuItemId::new(1)).unwrap();
        assert_eq!(item.name, "Classic Chicken Bento");
        assert!(find_item(MenuItemId::new(999)).is_none());
    }

    #[test]
    fn test_find_location() {
        assert_eq!(find_location("siam").unwrap().name, "Bento Bop Siam");
        assert!(find_location("nowhere").is_none());
    }

    #[test]
    fn test_category_slug_roundtrip() {
        for category in CategoryId::all() {
            let parsed: CategoryId = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }
}
