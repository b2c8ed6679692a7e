//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /menu                   - Menu listing (?category=bento)
//!
//! # Cart (HTMX fragments with full-page fallback)
//! GET  /cart                   - Cart page (?year=&month= for calendar nav)
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Update quantity
//! POST /cart/remove            - Remove item
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/delivery          - Choose pickup or delivery
//! POST /cart/location          - Choose pickup location
//! POST /cart/schedule          - Choose date and time slot
//!
//! # Checkout
//! GET  /checkout               - Checkout form
//! POST /checkout               - Place (simulated) order
//! POST /checkout/promo         - Apply promo code
//!
//! # Orders
//! GET  /orders/confirmation    - Order confirmation page
//!
//! # Auth (simulated)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires sign-in)
//! GET  /account                - Account overview + session order history
//!
//! # Content pages
//! GET  /pages/about            - About us
//! GET  /pages/faq              - FAQ
//! GET  /pages/privacy          - Privacy policy
//!
//! # Contact
//! GET  /contact                - Contact form
//! POST /contact                - Submit contact form
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod menu;
pub mod orders;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/delivery", post(cart::select_delivery))
        .route("/location", post(cart::select_location))
        .route("/schedule", post(cart::select_schedule))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::place_order))
        .route("/promo", post(checkout::apply_promo))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Menu
        .route("/menu", get(menu::index))
        // Cart routes (rate limited alongside checkout)
        .nest("/cart", cart_routes().layer(api_rate_limiter()))
        // Checkout routes
        .nest("/checkout", checkout_routes().layer(api_rate_limiter()))
        // Order confirmation
        .route("/orders/confirmation", get(orders::confirmation))
        // Account
        .route("/account", get(account::index))
        // Auth routes (strict rate limit)
        .nest("/auth", auth_routes().layer(auth_rate_limiter()))
        // Content pages
        .nest("/pages", pages::router())
        // Contact form
        .route("/contact", get(contact::show).post(contact::submit))
}
