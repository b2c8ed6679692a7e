//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads;
//! every mutation also works as a plain form POST (redirect back to the cart
//! page) so the site degrades without JavaScript. The cart itself lives in
//! the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bento_bop_core::{FulfillmentMethod, MenuItemId};

use crate::catalog;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::cart::{Cart, DeliveryInfo};
use crate::models::session as session_state;
use crate::services::schedule;

/// Whether the request came from HTMX (fragment wanted) or a plain form
/// submission (redirect wanted).
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// Today's date, anchoring calendar availability.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image: String,
}

/// Order math display data for templates.
#[derive(Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub delivery_fee: String,
    pub show_delivery_fee: bool,
    pub discount: String,
    pub has_discount: bool,
    pub total: String,
}

/// Pickup location display data for templates.
#[derive(Clone)]
pub struct LocationView {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub hours: &'static str,
    pub selected: bool,
}

/// One calendar cell for templates.
#[derive(Clone)]
pub struct CalendarCellView {
    pub day: u32,
    /// ISO date form value, e.g. "2026-08-10".
    pub value: String,
    pub in_month: bool,
    pub available: bool,
    pub is_today: bool,
    pub selected: bool,
}

/// Calendar grid plus month navigation for templates.
#[derive(Clone)]
pub struct CalendarView {
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<CalendarCellView>,
    pub can_go_back: bool,
    pub prev_year: i32,
    pub prev_month: u32,
    pub next_year: i32,
    pub next_month: u32,
}

/// One time slot for templates.
#[derive(Clone)]
pub struct SlotView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Everything the cart page (and its HTMX fragment) renders.
#[derive(Clone)]
pub struct CartPageView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub is_empty: bool,
    pub totals: TotalsView,
    pub is_pickup: bool,
    pub is_delivery: bool,
    pub locations: Vec<LocationView>,
    pub calendar: CalendarView,
    pub slots: Vec<SlotView>,
    pub selected_date_label: Option<String>,
    pub selected_time_label: Option<String>,
    pub can_checkout: bool,
    pub gate_message: Option<String>,
    pub delivery_fee_label: String,
}

impl CartPageView {
    /// Assemble the view from session state.
    ///
    /// `year`/`month` select the displayed calendar month; out-of-range
    /// values fall back to the month of the selected date, or today's.
    fn build(
        cart: &Cart,
        delivery: &DeliveryInfo,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Self {
        use chrono::Datelike;

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
        let totals_view = TotalsView {
            subtotal: totals.subtotal.to_string(),
            delivery_fee: totals.delivery_fee.to_string(),
            show_delivery_fee: delivery.method == Some(FulfillmentMethod::Delivery),
            discount: totals.discount.to_string(),
            has_discount: !totals.discount.is_zero(),
            total: totals.total.to_string(),
        };

        let fallback = delivery.date.unwrap_or(today);
        let (cal_year, cal_month) = (
            year.unwrap_or_else(|| fallback.year()),
            month.unwrap_or_else(|| fallback.month()),
        );
        let view = schedule::month_view(cal_year, cal_month, today).unwrap_or_else(|| {
            // Invalid query params fall back to the current month, which
            // always exists.
            schedule::month_view(today.year(), today.month(), today)
                .expect("current month is always a valid calendar month")
        });

        let calendar = CalendarView {
            title: view.title,
            weekdays: schedule::WEEKDAYS,
            cells: view
                .cells
                .into_iter()
                .map(|cell| CalendarCellView {
                    day: cell.day,
                    value: cell.date.format("%Y-%m-%d").to_string(),
                    in_month: cell.in_month,
                    available: cell.available,
                    is_today: cell.is_today,
                    selected: delivery.date == Some(cell.date),
                })
                .collect(),
            can_go_back: view.can_go_back,
            prev_year: view.prev_year,
            prev_month: view.prev_month,
            next_year: view.next_year,
            next_month: view.next_month,
        };

        let slots = schedule::time_slots()
            .into_iter()
            .map(|slot| SlotView {
                selected: delivery.time == Some(slot.time),
                value: slot.value,
                label: slot.label,
            })
            .collect();

        let locations = catalog::pickup_locations()
            .iter()
            .map(|location| LocationView {
                id: location.id,
                name: location.name,
                address: location.address,
                city: location.city,
                hours: location.hours,
                selected: delivery.location.as_deref() == Some(location.id),
            })
            .collect();

        let scheduled = delivery.date.is_some() && delivery.time.is_some();
        let gate_message = match delivery.method {
            None => Some("Please select a delivery method".to_string()),
            Some(FulfillmentMethod::Pickup) if delivery.location.is_none() => {
                Some("Please select a pickup location".to_string())
            }
            Some(_) if !scheduled => Some("Please select date and time".to_string()),
            Some(_) => None,
        };

        Self {
            lines,
            item_count: cart.total_items(),
            is_empty: cart.is_empty(),
            totals: totals_view,
            is_pickup: delivery.method == Some(FulfillmentMethod::Pickup),
            is_delivery: delivery.method == Some(FulfillmentMethod::Delivery),
            locations,
            calendar,
            slots,
            selected_date_label: delivery.date.map(schedule::date_label),
            selected_time_label: delivery.time.map(schedule::slot_label),
            can_checkout: !cart.is_empty() && delivery.is_complete(),
            gate_message,
            delivery_fee_label: crate::models::cart::DELIVERY_FEE.to_string(),
        }
    }
}

// =============================================================================
// Form and Query Types
// =============================================================================

/// Calendar month navigation query.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: i32,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: i32,
}

/// Delivery method selection form data.
#[derive(Debug, Deserialize)]
pub struct DeliveryMethodForm {
    pub method: String,
}

/// Pickup location selection form data.
#[derive(Debug, Deserialize)]
pub struct LocationForm {
    pub location: String,
}

/// Date and/or time slot selection form data.
///
/// The calendar and the slot grid submit independently, so both fields are
/// optional; whichever is present is validated and stored.
#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    /// ISO date, e.g. "2026-08-10".
    pub date: Option<String>,
    /// Slot value, e.g. "13:00".
    pub time: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub view: CartPageView,
}

/// Cart fragment template (for HTMX swaps of the whole cart section).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_main.html")]
pub struct CartMainTemplate {
    pub view: CartPageView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Respond to a cart mutation: fragment for HTMX, redirect otherwise.
async fn cart_mutation_response(headers: &HeaderMap, session: &Session) -> Result<Response> {
    if is_htmx(headers) {
        let cart = session_state::load_cart(session).await?;
        let delivery = session_state::load_delivery(session).await?;
        let view = CartPageView::build(&cart, &delivery, None, None, today());
        Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartMainTemplate { view },
        )
            .into_response())
    } else {
        Ok(Redirect::to("/cart").into_response())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(
    session: Session,
    Query(query): Query<CalendarQuery>,
) -> Result<CartShowTemplate> {
    let cart = session_state::load_cart(&session).await?;
    let delivery = session_state::load_delivery(&session).await?;
    let view = CartPageView::build(&cart, &delivery, query.year, query.month, today());
    Ok(CartShowTemplate { view })
}

/// Add one of an item to the cart.
///
/// Returns the cart count badge with an HTMX trigger so the header badge
/// and cart section refresh; plain form posts bounce back to the menu.
#[instrument(skip(session, headers))]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let item = catalog::find_item(MenuItemId::new(form.item_id))
        .ok_or_else(|| AppError::BadRequest(format!("unknown menu item: {}", form.item_id)))?;

    let mut cart = session_state::load_cart(&session).await?;
    cart.add_item(item);
    let count = cart.total_items();
    session_state::save_cart(&session, &cart).await?;

    tracing::debug!(item = item.name, count, "added item to cart");
    crate::error::add_breadcrumb("cart", "Added item to cart", Some(&[("item", item.name)]));

    if is_htmx(&headers) {
        Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate { count },
        )
            .into_response())
    } else {
        Ok(Redirect::to("/menu").into_response())
    }
}

/// Update a cart line's quantity; zero removes the line.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = session_state::load_cart(&session).await?;
    cart.update_quantity(MenuItemId::new(form.item_id), form.quantity);
    session_state::save_cart(&session, &cart).await?;

    cart_mutation_response(&headers, &session).await
}

/// Remove a cart line.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = session_state::load_cart(&session).await?;
    cart.remove_item(MenuItemId::new(form.item_id));
    session_state::save_cart(&session, &cart).await?;

    cart_mutation_response(&headers, &session).await
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = session_state::load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_items(),
    })
}

/// Choose pickup or delivery.
///
/// Switching methods clears the pickup location, mirroring the original
/// cart screen.
#[instrument(skip(session, headers))]
pub async fn select_delivery(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<DeliveryMethodForm>,
) -> Result<Response> {
    let method = form
        .method
        .parse::<FulfillmentMethod>()
        .map_err(AppError::BadRequest)?;

    let mut delivery = session_state::load_delivery(&session).await?;
    delivery.method = Some(method);
    delivery.location = None;
    session_state::save_delivery(&session, &delivery).await?;

    cart_mutation_response(&headers, &session).await
}

/// Choose a pickup location.
#[instrument(skip(session, headers))]
pub async fn select_location(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LocationForm>,
) -> Result<Response> {
    let location = catalog::find_location(&form.location)
        .ok_or_else(|| AppError::BadRequest(format!("unknown location: {}", form.location)))?;

    let mut delivery = session_state::load_delivery(&session).await?;
    delivery.location = Some(location.id.to_string());
    session_state::save_delivery(&session, &delivery).await?;

    cart_mutation_response(&headers, &session).await
}

/// Choose a scheduled date and time slot.
#[instrument(skip(session, headers))]
pub async fn select_schedule(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ScheduleForm>,
) -> Result<Response> {
    let mut delivery = session_state::load_delivery(&session).await?;

    if let Some(raw) = &form.date {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("invalid date: {raw}")))?;
        if !schedule::is_selectable(date, today()) {
            return Err(AppError::BadRequest(
                "date is outside the booking window".to_string(),
            ));
        }
        delivery.date = Some(date);
    }

    if let Some(raw) = &form.time {
        let time = NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|_| AppError::BadRequest(format!("invalid time: {raw}")))?;
        if !schedule::is_valid_slot(time) {
            return Err(AppError::BadRequest(
                "time is not an offered slot".to_string(),
            ));
        }
        delivery.time = Some(time);
    }

    session_state::save_delivery(&session, &delivery).await?;

    cart_mutation_response(&headers, &session).await
}
