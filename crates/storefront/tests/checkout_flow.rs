//! Checkout, scheduling, promo, and auth flows over the full router.

mod common;

use axum::http::{StatusCode, header};
use chrono::{Duration, Utc};

use common::{TestClient, body_string};

/// Tomorrow as the ISO date the calendar submits.
fn tomorrow() -> String {
    (Utc::now().date_naive() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

/// Walk a client through cart -> delivery selection, ready for checkout.
async fn fill_cart_and_schedule(client: &mut TestClient) {
    client.post("/cart/add", &[("item_id", "1")]).await; // $12.99
    client.post("/cart/add", &[("item_id", "5")]).await; // $5.99
    client
        .post("/cart/delivery", &[("method", "pickup")])
        .await;
    client
        .post("/cart/location", &[("location", "siam")])
        .await;
    client
        .post(
            "/cart/schedule",
            &[("date", tomorrow().as_str()), ("time", "13:00")],
        )
        .await;
}

fn checkout_fields() -> Vec<(&'static str, String)> {
    vec![
        ("email", "jane@example.com".to_string()),
        ("phone", "+66 81 234 5678".to_string()),
        ("first_name", "Jane".to_string()),
        ("last_name", "Doe".to_string()),
        ("address", "123 Street name, Building, Floor".to_string()),
        ("city", "Bangkok".to_string()),
        ("postal_code", "10110".to_string()),
        ("payment_method", "card".to_string()),
        ("card_number", "4242 4242 4242 4242".to_string()),
        ("card_expiry", "12/29".to_string()),
        ("card_cvc", "123".to_string()),
    ]
}

#[tokio::test]
async fn checkout_requires_delivery_selection() {
    let mut client = TestClient::new();
    client.post("/cart/add", &[("item_id", "1")]).await;

    let response = client.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/cart")
    );
}

#[tokio::test]
async fn checkout_with_empty_cart_shows_empty_state() {
    let mut client = TestClient::new();
    let response = client.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Your cart is empty"));
}

#[tokio::test]
async fn schedule_rejects_past_dates_and_bad_slots() {
    let mut client = TestClient::new();
    client.post("/cart/add", &[("item_id", "1")]).await;
    client
        .post("/cart/delivery", &[("method", "delivery")])
        .await;

    let yesterday = (Utc::now().date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let response = client
        .post("/cart/schedule", &[("date", yesterday.as_str())])
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post("/cart/schedule", &[("time", "21:00")])
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_gates_checkout_until_selection_is_complete() {
    let mut client = TestClient::new();
    client.post("/cart/add", &[("item_id", "1")]).await;
    client
        .post("/cart/delivery", &[("method", "pickup")])
        .await;

    let body = body_string(client.get("/cart").await).await;
    assert!(body.contains("Please select a pickup location"));

    client
        .post("/cart/location", &[("location", "siam")])
        .await;
    let body = body_string(client.get("/cart").await).await;
    assert!(body.contains("Please select date and time"));
}

#[tokio::test]
async fn full_checkout_flow_places_order_and_clears_cart() {
    let mut client = TestClient::new();
    fill_cart_and_schedule(&mut client).await;

    // checkout page is reachable now
    let response = client.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Store Pickup - Bento Bop Siam"));
    assert!(body.contains("1:00 PM"));

    // place the order
    let fields = checkout_fields();
    let fields: Vec<(&str, &str)> = fields
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    let response = client.post("/checkout", &fields).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/orders/confirmation")
    );

    // confirmation renders the snapshot
    let response = client.get("/orders/confirmation").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Thank you for your order!"));
    assert!(body.contains("BB-"));
    assert!(body.contains("Classic Chicken Bento"));
    assert!(body.contains("$18.98")); // subtotal, pickup has no fee
    assert!(body.contains("Ready for pickup at 1:00 PM"));

    // the cart is now empty
    let response = client.get("/cart/count").await;
    assert_eq!(body_string(response).await.trim(), "");
}

#[tokio::test]
async fn checkout_validation_rerenders_with_messages() {
    let mut client = TestClient::new();
    fill_cart_and_schedule(&mut client).await;

    let response = client
        .post("/checkout", &[("email", "not-an-email")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("First name is required"));
    assert!(body.contains("Please select a payment method"));
    // the bad value is kept for correction
    assert!(body.contains("not-an-email"));
}

#[tokio::test]
async fn promo_code_applies_and_unknown_code_does_not() {
    let mut client = TestClient::new();
    fill_cart_and_schedule(&mut client).await;

    // unknown code: message, totals untouched
    let response = client
        .post_htmx("/checkout/promo", &[("promo_code", "FREELUNCH")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("That code isn&#39;t valid"));
    assert!(body.contains("$18.98"));

    // known code, case-insensitive
    let response = client
        .post_htmx("/checkout/promo", &[("promo_code", "bento20")])
        .await;
    let body = body_string(response).await;
    assert!(body.contains("BENTO20 applied"));
    // $18.98 subtotal, $20 discount clamped, total free
    assert!(body.contains("$0.00"));
}

#[tokio::test]
async fn order_confirmation_without_order_goes_home() {
    let mut client = TestClient::new();
    let response = client.get("/orders/confirmation").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn account_requires_sign_in() {
    let mut client = TestClient::new();
    let response = client.get("/account").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/auth/login")
    );
}

#[tokio::test]
async fn register_signs_in_and_account_lists_orders() {
    let mut client = TestClient::new();
    fill_cart_and_schedule(&mut client).await;

    let fields = checkout_fields();
    let fields: Vec<(&str, &str)> = fields
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    client.post("/checkout", &fields).await;

    let response = client
        .post(
            "/auth/register",
            &[
                ("name", "Jane"),
                ("email", "jane@example.com"),
                ("password", "hunter22"),
                ("confirm_password", "hunter22"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client.get("/account").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Jane"));
    assert!(body.contains("BB-"));
    assert!(body.contains("Pending"));
}

#[tokio::test]
async fn login_rejects_short_passwords() {
    let mut client = TestClient::new();
    let response = client
        .post(
            "/auth/login",
            &[("email", "jane@example.com"), ("password", "short")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Password must be at least 6 characters"));
}
