//! Order confirmation route handler.
//!
//! The confirmation page shows the session's most recently placed order.
//! There is no order lookup by id: orders are simulated and never leave the
//! session.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use bento_bop_core::FulfillmentMethod;

use crate::catalog;
use crate::error::Result;
use crate::filters;
use crate::models::order::Order;
use crate::models::session as session_state;
use crate::routes::cart::{CartLineView, TotalsView};

/// Placed order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub status: &'static str,
    pub placed_at: String,
    pub eta: String,
    pub schedule: String,
    pub fulfillment: &'static str,
    pub location: Option<String>,
    pub lines: Vec<CartLineView>,
    pub totals: TotalsView,
    pub promo_code: Option<String>,
    pub email: String,
    pub recipient: String,
    pub address: String,
    pub payment: &'static str,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let lines = order
            .lines
            .iter()
            .map(|line| CartLineView {
                id: line.id.as_i32(),
                name: line.name.clone(),
                price: line.price.to_string(),
                quantity: line.quantity,
                line_total: line.line_total().to_string(),
                image: line.image.clone(),
            })
            .collect();

        Self {
            number: order.number(),
            status: order.status.label(),
            placed_at: order.created_at.format("%b %-d, %Y %H:%M UTC").to_string(),
            eta: order.eta_label(),
            schedule: format!(
                "{} at {}",
                order.scheduled_date_label(),
                crate::services::schedule::slot_label(order.scheduled_time)
            ),
            fulfillment: order.fulfillment.label(),
            location: order
                .location
                .as_deref()
                .and_then(catalog::find_location)
                .map(|location| location.name.to_string()),
            lines,
            totals: TotalsView {
                subtotal: order.totals.subtotal.to_string(),
                delivery_fee: order.totals.delivery_fee.to_string(),
                show_delivery_fee: order.fulfillment == FulfillmentMethod::Delivery,
                discount: order.totals.discount.to_string(),
                has_discount: !order.totals.discount.is_zero(),
                total: order.totals.total.to_string(),
            },
            promo_code: order.promo_code.clone(),
            email: order.contact.email.to_string(),
            recipient: order.address.full_name(),
            address: format!(
                "{}, {} {}",
                order.address.address, order.address.city, order.address.postal_code
            ),
            payment: order.payment_method.label(),
        }
    }
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: OrderView,
}

/// Display the confirmation page for the session's latest order.
///
/// With nothing placed this session, there is nothing to confirm; go home.
#[instrument(skip(session))]
pub async fn confirmation(session: Session) -> Result<Response> {
    let Some(order) = session_state::current_order(&session).await else {
        return Ok(Redirect::to("/").into_response());
    };

    Ok(ConfirmationTemplate {
        order: OrderView::from(&order),
    }
    .into_response())
}
