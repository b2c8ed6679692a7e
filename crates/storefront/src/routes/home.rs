//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::catalog::{self, CategoryId};
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::menu::MenuItemView;

// =============================================================================
// Hero Configuration (static content)
// =============================================================================

/// The hero banner content.
#[derive(Clone)]
pub struct HeroView {
    pub eyebrow: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    pub button_url: &'static str,
    pub image_path: &'static str,
    pub image_alt: &'static str,
}

impl Default for HeroView {
    fn default() -> Self {
        Self {
            eyebrow: "Fresh daily in Bangkok",
            title: "Bento, But Make It Bop",
            subtitle: "Hand-packed bento boxes, sides, and matcha everything. \
                       Order ahead for pickup or same-day delivery.",
            button_text: "Browse Menu",
            button_url: "/menu",
            image_path: "/static/images/hero-bento.jpg",
            image_alt: "A spread of bento boxes",
        }
    }
}

/// Rotating promo banner texts.
///
/// Rotation happens client-side; the first entry renders as the initial
/// state so the banner works without JavaScript.
const PROMO_BANNERS: [&str; 3] = [
    "Use code BENTO20 for $20 off your first order!",
    "Free delivery on orders over $30!",
    "Get a free drink with every Bento Box!",
];

/// Number of featured items on the home page.
const FEATURED_ITEMS: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: HeroView,
    /// Initial banner text; the rest rotate in client-side.
    pub first_promo: &'static str,
    pub promos: Vec<&'static str>,
    pub featured: Vec<MenuItemView>,
    pub nonce: String,
}

/// Display the home page.
#[instrument(skip(nonce))]
pub async fn home(CspNonce(nonce): CspNonce) -> HomeTemplate {
    let featured = catalog::items_in_category(CategoryId::Bento)
        .into_iter()
        .take(FEATURED_ITEMS)
        .map(|item| MenuItemView {
            id: item.id.as_i32(),
            name: item.name,
            description: item.description,
            price: item.price.to_string(),
            image: item.image,
            in_cart: 0,
        })
        .collect();

    HomeTemplate {
        hero: HeroView::default(),
        first_promo: PROMO_BANNERS[0],
        promos: PROMO_BANNERS.to_vec(),
        featured,
        nonce,
    }
}
