//! Cart state: line items, delivery selection, and order math.
//!
//! The whole cart is serialized into the session, so every type here is a
//! plain serde struct. Mutations are pure methods; handlers load the cart,
//! mutate, and write it back.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use bento_bop_core::{FulfillmentMethod, MenuItemId, Price};

use crate::catalog::MenuItem;
use crate::services::promo;

/// Flat courier fee for delivery orders.
pub const DELIVERY_FEE: Price = Price::from_cents(200);

/// Subtotal at which the delivery fee is waived.
pub const FREE_DELIVERY_THRESHOLD: Price = Price::from_cents(3000);

/// One line in the cart: a menu item snapshot plus a quantity.
///
/// Name, price, and image are copied from the catalog at add time so a
/// placed order's snapshot stays stable even if the menu changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: String,
}

impl CartLine {
    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The session-held shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    promo_code: Option<String>,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add one of `item` to the cart.
    ///
    /// An existing line for the same item id is incremented; otherwise a new
    /// line with quantity 1 is appended.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                id: item.id,
                name: item.name.to_string(),
                price: item.price,
                quantity: 1,
                image: item.image.to_string(),
            });
        }
    }

    /// Set the quantity for an item; 0 removes the line.
    ///
    /// Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: MenuItemId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line entirely. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: MenuItemId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Empty the cart and drop any applied promo code.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.promo_code = None;
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The currently applied promo code, if any.
    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Try to apply a promo code.
    ///
    /// Returns the discount amount if the code is in the promo table; an
    /// unknown code leaves the cart untouched. Re-applying the same code is
    /// idempotent.
    pub fn apply_promo(&mut self, code: &str) -> Option<Price> {
        let (canonical, discount) = promo::lookup(code)?;
        self.promo_code = Some(canonical.to_string());
        Some(discount)
    }

    /// The fee for the chosen fulfillment method.
    ///
    /// Pickup is free; delivery is free once the subtotal reaches the
    /// waiver threshold.
    #[must_use]
    pub fn delivery_fee(&self, method: Option<FulfillmentMethod>) -> Price {
        match method {
            Some(FulfillmentMethod::Delivery) => {
                if self.subtotal() >= FREE_DELIVERY_THRESHOLD {
                    Price::zero()
                } else {
                    DELIVERY_FEE
                }
            }
            Some(FulfillmentMethod::Pickup) | None => Price::zero(),
        }
    }

    /// Compute the full order math for the chosen fulfillment method.
    ///
    /// The discount is clamped so the total never goes negative.
    #[must_use]
    pub fn totals(&self, method: Option<FulfillmentMethod>) -> CartTotals {
        let subtotal = self.subtotal();
        let delivery_fee = self.delivery_fee(method);
        let before_discount = subtotal + delivery_fee;

        let raw_discount = self
            .promo_code
            .as_deref()
            .and_then(|code| promo::lookup(code))
            .map_or_else(Price::zero, |(_, discount)| discount);
        let discount = if raw_discount > before_discount {
            before_discount
        } else {
            raw_discount
        };

        CartTotals {
            subtotal,
            delivery_fee,
            discount,
            total: before_discount.saturating_sub(discount),
        }
    }
}

/// Order math snapshot, rendered in summaries and copied onto placed orders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub discount: Price,
    pub total: Price,
}

/// Delivery / pickup selection made on the cart screen.
///
/// Consumed at checkout; incomplete selections keep the checkout button
/// disabled, mirroring the cart page's gating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub method: Option<FulfillmentMethod>,
    /// Pickup location id; only meaningful for pickup.
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl DeliveryInfo {
    /// Whether checkout may proceed: a method is chosen, pickup has a
    /// location, and both date and time are set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let scheduled = self.date.is_some() && self.time.is_some();
        match self.method {
            Some(FulfillmentMethod::Pickup) => self.location.is_some() && scheduled,
            Some(FulfillmentMethod::Delivery) => scheduled,
            None => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog;

    fn item(id: i32) -> &'static MenuItem {
        catalog::find_item(MenuItemId::new(id)).unwrap()
    }

    #[test]
    fn test_add_new_item_appends_with_quantity_one() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].name, "Classic Chicken Bento");
    }

    #[test]
    fn test_add_existing_item_increments_rather_than_duplicates() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        cart.add_item(item(1));
        cart.add_item(item(1));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let mut cart = Cart::default();
        cart.add_item(item(1)); // $12.99
        cart.add_item(item(1)); // x2
        cart.add_item(item(6)); // $4.99
        assert_eq!(cart.subtotal(), Price::from_cents(1299 * 2 + 499));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        cart.add_item(item(5));
        cart.update_quantity(MenuItemId::new(1), 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].id, MenuItemId::new(5));
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        cart.update_quantity(MenuItemId::new(1), 5);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        cart.update_quantity(MenuItemId::new(99), 4);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        cart.remove_item(MenuItemId::new(1));
        assert!(cart.is_empty());
        // removing again is a no-op
        cart.remove_item(MenuItemId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_drops_lines_and_promo() {
        let mut cart = Cart::default();
        cart.add_item(item(1));
        assert!(cart.apply_promo("BENTO20").is_some());
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.promo_code().is_none());
    }

    #[test]
    fn test_unknown_promo_never_reduces_total() {
        let mut cart = Cart::default();
        cart.add_item(item(2));
        let before = cart.totals(Some(FulfillmentMethod::Delivery));
        assert!(cart.apply_promo("NOTACODE").is_none());
        let after = cart.totals(Some(FulfillmentMethod::Delivery));
        assert_eq!(before, after);
    }

    #[test]
    fn test_promo_is_case_insensitive_and_idempotent() {
        let mut cart = Cart::default();
        cart.add_item(item(2));
        assert!(cart.apply_promo("bento20").is_some());
        assert_eq!(cart.promo_code(), Some("BENTO20"));
        assert!(cart.apply_promo("BENTO20").is_some());
        assert_eq!(cart.promo_code(), Some("BENTO20"));
    }

    #[test]
    fn test_discount_clamps_total_at_zero() {
        let mut cart = Cart::default();
        cart.add_item(item(8)); // $2.49, well under the $20 discount
        cart.apply_promo("BENTO20").unwrap();
        let totals = cart.totals(Some(FulfillmentMethod::Pickup));
        assert_eq!(totals.discount, Price::from_cents(249));
        assert_eq!(totals.total, Price::zero());
    }

    #[test]
    fn test_delivery_fee_applied_under_threshold() {
        let mut cart = Cart::default();
        cart.add_item(item(1)); // $12.99
        assert_eq!(
            cart.delivery_fee(Some(FulfillmentMethod::Delivery)),
            DELIVERY_FEE
        );
        assert_eq!(
            cart.delivery_fee(Some(FulfillmentMethod::Pickup)),
            Price::zero()
        );
        assert_eq!(cart.delivery_fee(None), Price::zero());
    }

    #[test]
    fn test_delivery_fee_waived_at_threshold() {
        let mut cart = Cart::default();
        cart.add_item(item(2)); // $14.99
        cart.update_quantity(MenuItemId::new(2), 3); // $44.97
        assert_eq!(
            cart.delivery_fee(Some(FulfillmentMethod::Delivery)),
            Price::zero()
        );
    }

    #[test]
    fn test_totals_math() {
        let mut cart = Cart::default();
        cart.add_item(item(1)); // $12.99
        cart.add_item(item(5)); // $5.99
        cart.apply_promo("BENTO20").unwrap();
        let totals = cart.totals(Some(FulfillmentMethod::Delivery));
        assert_eq!(totals.subtotal, Price::from_cents(1898));
        assert_eq!(totals.delivery_fee, Price::from_cents(200));
        // $20 discount fits under the $20.98 pre-discount total
        assert_eq!(totals.discount, Price::from_cents(2000));
        assert_eq!(totals.total, Price::from_cents(98));
    }

    #[test]
    fn test_delivery_info_completeness() {
        let mut info = DeliveryInfo::default();
        assert!(!info.is_complete());

        info.method = Some(FulfillmentMethod::Delivery);
        assert!(!info.is_complete());

        info.date = NaiveDate::from_ymd_opt(2026, 8, 10);
        info.time = NaiveTime::from_hms_opt(12, 0, 0);
        assert!(info.is_complete());

        // pickup additionally needs a location
        info.method = Some(FulfillmentMethod::Pickup);
        assert!(!info.is_complete());
        info.location = Some("siam".to_string());
        assert!(info.is_complete());
    }
}
