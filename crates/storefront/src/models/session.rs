//! Session-stored state.
//!
//! The session is the only store this site has: it holds the signed-in user,
//! the cart, the delivery selection, and any placed orders. Everything here
//! is a thin typed wrapper over `tower_sessions::Session`.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use bento_bop_core::{Email, UserId};

use crate::models::cart::{Cart, DeliveryInfo};
use crate::models::order::Order;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user.
/// Sign-in is simulated, so this is all there is to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the delivery/pickup selection.
    pub const DELIVERY_INFO: &str = "delivery_info";

    /// Key for the most recently placed order (confirmation page).
    pub const CURRENT_ORDER: &str = "current_order";

    /// Key for this session's order history (account page).
    pub const ORDER_HISTORY: &str = "order_history";
}

/// Load the cart, defaulting to empty.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Persist the cart back into the session.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Load the delivery selection, defaulting to nothing chosen.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn load_delivery(
    session: &Session,
) -> Result<DeliveryInfo, tower_sessions::session::Error> {
    Ok(session
        .get::<DeliveryInfo>(keys::DELIVERY_INFO)
        .await?
        .unwrap_or_default())
}

/// Persist the delivery selection.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn save_delivery(
    session: &Session,
    info: &DeliveryInfo,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::DELIVERY_INFO, info).await
}

/// Get the signed-in user, if any. Store errors read as signed-out.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Sign a user in.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Sign the user out.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}

/// Record a freshly placed order: it becomes the confirmation-page order and
/// joins the session's order history.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn record_order(
    session: &Session,
    order: &Order,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_ORDER, order).await?;

    let mut history = order_history(session).await?;
    history.push(order.clone());
    session.insert(keys::ORDER_HISTORY, &history).await
}

/// The most recently placed order, for the confirmation page.
pub async fn current_order(session: &Session) -> Option<Order> {
    session
        .get::<Order>(keys::CURRENT_ORDER)
        .await
        .ok()
        .flatten()
}

/// All orders placed in this session, oldest first.
///
/// # Errors
///
/// Returns the session store error, if any.
pub async fn order_history(
    session: &Session,
) -> Result<Vec<Order>, tower_sessions::session::Error> {
    Ok(session
        .get::<Vec<Order>>(keys::ORDER_HISTORY)
        .await?
        .unwrap_or_default())
}
