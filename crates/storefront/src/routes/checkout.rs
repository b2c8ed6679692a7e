//! Checkout route handlers.
//!
//! One page of numbered sections (contact, address, delivery time, payment,
//! promo, summary) mirroring the cart's gating: the page is only reachable
//! with a non-empty cart and a completed delivery selection. Placing an
//! order is simulated end to end.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bento_bop_core::{FulfillmentMethod, OrderId, OrderStatus};

use crate::catalog;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::models::cart::{Cart, DeliveryInfo};
use crate::models::order::Order;
use crate::models::session as session_state;
use crate::routes::cart::{CartLineView, TotalsView, is_htmx};
use crate::services::checkout::{CheckoutForm, FieldErrors, validate};
use crate::services::schedule;

// =============================================================================
// View Types
// =============================================================================

/// Order summary section data (also the promo fragment).
#[derive(Clone)]
pub struct SummaryView {
    pub lines: Vec<CartLineView>,
    pub totals: TotalsView,
    pub promo_applied: Option<String>,
    pub promo_error: Option<String>,
}

impl SummaryView {
    fn build(cart: &Cart, delivery: &DeliveryInfo, promo_error: Option<String>) -> Self {
        let lines = cart
            .lines()
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

        let totals = cart.totals(delivery.method);
        Self {
            lines,
            totals: TotalsView {
                subtotal: totals.subtotal.to_string(),
                delivery_fee: totals.delivery_fee.to_string(),
                show_delivery_fee: delivery.method == Some(FulfillmentMethod::Delivery),
                discount: totals.discount.to_string(),
                has_discount: !totals.discount.is_zero(),
                total: totals.total.to_string(),
            },
            promo_applied: cart.promo_code().map(String::from),
            promo_error,
        }
    }
}

/// Everything the checkout page renders.
#[derive(Clone)]
pub struct CheckoutPageView {
    pub is_empty: bool,
    pub user_name: Option<String>,
    /// e.g. "Store Pickup - Bento Bop Siam" or "Delivery".
    pub delivery_label: String,
    /// e.g. "Monday, Aug 10 at 1:00 PM".
    pub schedule_label: String,
    pub form: CheckoutForm,
    pub errors: FieldErrors,
}

impl CheckoutPageView {
    fn build(
        user: Option<&CurrentUser>,
        cart: &Cart,
        delivery: &DeliveryInfo,
        form: CheckoutForm,
        errors: FieldErrors,
    ) -> Self {
        let delivery_label = match delivery.method {
            Some(FulfillmentMethod::Pickup) => {
                let location = delivery
                    .location
                    .as_deref()
                    .and_then(catalog::find_location)
                    .map_or("", |location| location.name);
                format!("Store Pickup - {location}")
            }
            Some(FulfillmentMethod::Delivery) => "Delivery".to_string(),
            None => String::new(),
        };

        let schedule_label = match (delivery.date, delivery.time) {
            (Some(date), Some(time)) => format!(
                "{} at {}",
                schedule::date_label(date),
                schedule::slot_label(time)
            ),
            _ => String::new(),
        };

        Self {
            is_empty: cart.is_empty(),
            user_name: user.map(|user| user.name.clone()),
            delivery_label,
            schedule_label,
            form,
            errors,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Checkout page template.
///
/// `summary` sits beside `view` so the summary partial sees the same
/// variable name here and in the HTMX fragment.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub view: CheckoutPageView,
    pub summary: SummaryView,
}

/// Order summary fragment template (for HTMX promo application).
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_summary.html")]
pub struct CheckoutSummaryTemplate {
    pub summary: SummaryView,
}

/// Promo code form data.
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    pub promo_code: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the checkout form.
///
/// An empty cart renders the empty state; an incomplete delivery selection
/// bounces back to the cart screen where it is made.
#[instrument(skip(session, user))]
pub async fn show(session: Session, OptionalAuth(user): OptionalAuth) -> Result<Response> {
    let cart = session_state::load_cart(&session).await?;
    let delivery = session_state::load_delivery(&session).await?;

    if !cart.is_empty() && !delivery.is_complete() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let view = CheckoutPageView::build(
        user.as_ref(),
        &cart,
        &delivery,
        CheckoutForm::default(),
        FieldErrors::default(),
    );
    let summary = SummaryView::build(&cart, &delivery, None);
    Ok(CheckoutShowTemplate { view, summary }.into_response())
}

/// Apply a promo code (HTMX fragment, with full-page fallback).
///
/// Unknown codes leave the totals untouched and surface a message; the
/// lookup table is the whole promo system.
#[instrument(skip(session, headers))]
pub async fn apply_promo(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<PromoForm>,
) -> Result<Response> {
    let mut cart = session_state::load_cart(&session).await?;
    let delivery = session_state::load_delivery(&session).await?;

    let promo_error = if cart.apply_promo(&form.promo_code).is_some() {
        session_state::save_cart(&session, &cart).await?;
        None
    } else {
        tracing::debug!(code = %form.promo_code, "unknown promo code");
        Some("That code isn't valid".to_string())
    };

    if is_htmx(&headers) {
        let summary = SummaryView::build(&cart, &delivery, promo_error);
        Ok(CheckoutSummaryTemplate { summary }.into_response())
    } else {
        Ok(Redirect::to("/checkout").into_response())
    }
}

/// Place the (simulated) order.
///
/// Validation failures re-render the form with per-field messages and the
/// entered values (card fields excluded). Success snapshots the order into
/// the session, clears the cart, and redirects to the confirmation page.
#[instrument(skip(session, user, form))]
pub async fn place_order(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = session_state::load_cart(&session).await?;
    let delivery = session_state::load_delivery(&session).await?;

    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }
    let (Some(method), Some(date), Some(time)) = (delivery.method, delivery.date, delivery.time)
    else {
        return Ok(Redirect::to("/cart").into_response());
    };
    if !delivery.is_complete() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let today = Utc::now().date_naive();
    let checkout = match validate(&form, today) {
        Ok(checkout) => checkout,
        Err(errors) => {
            // Re-render with messages; never echo card details back
            let form = CheckoutForm {
                card_number: String::new(),
                card_expiry: String::new(),
                card_cvc: String::new(),
                ..form
            };
            let view = CheckoutPageView::build(user.as_ref(), &cart, &delivery, form, errors);
            let summary = SummaryView::build(&cart, &delivery, None);
            return Ok(CheckoutShowTemplate { view, summary }.into_response());
        }
    };

    let order = Order {
        id: OrderId::generate(),
        lines: cart.lines().to_vec(),
        totals: cart.totals(Some(method)),
        promo_code: cart.promo_code().map(String::from),
        fulfillment: method,
        location: delivery.location.clone(),
        scheduled_date: date,
        scheduled_time: time,
        contact: checkout.contact,
        address: checkout.address,
        payment_method: checkout.payment_method,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    };

    let number = order.number();
    tracing::info!(
        order = %number,
        total = %order.totals.total,
        fulfillment = ?order.fulfillment,
        "order placed"
    );
    crate::error::add_breadcrumb("checkout", "Placed order", Some(&[("order", number.as_str())]));

    session_state::record_order(&session, &order).await?;

    cart.clear();
    session_state::save_cart(&session, &cart).await?;

    Ok(Redirect::to("/orders/confirmation").into_response())
}
