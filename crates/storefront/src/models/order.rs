//! Placed (simulated) orders.
//!
//! An order is a snapshot taken at checkout: cart lines, totals, delivery
//! selection, and contact details. It lives only in the session; there is no
//! order store and nothing ever advances the status.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use bento_bop_core::{Email, FulfillmentMethod, OrderId, OrderStatus, PaymentMethod};

use crate::models::cart::{CartLine, CartTotals};
use crate::services::schedule;

/// Contact details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderContact {
    pub email: Email,
    /// Normalized phone number (digits and a leading + only).
    pub phone: String,
}

/// Address collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl OrderAddress {
    /// Full name for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub promo_code: Option<String>,
    pub fulfillment: FulfillmentMethod,
    /// Pickup location id, for pickup orders.
    pub location: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub contact: OrderContact,
    pub address: OrderAddress,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Human-facing order number, e.g. `BB-9F3A21C4`.
    #[must_use]
    pub fn number(&self) -> String {
        self.id.order_number()
    }

    /// When the customer can expect the order, e.g.
    /// "Ready for pickup at 1:00 PM" or "Delivered within 2-4 hours of 1:00 PM".
    #[must_use]
    pub fn eta_label(&self) -> String {
        let slot = schedule::slot_label(self.scheduled_time);
        match self.fulfillment {
            FulfillmentMethod::Pickup => format!("Ready for pickup at {slot}"),
            FulfillmentMethod::Delivery => {
                format!("Delivered within 2-4 hours of {slot}")
            }
        }
    }

    /// Scheduled day for display, e.g. "Monday, Aug 10".
    #[must_use]
    pub fn scheduled_date_label(&self) -> String {
        schedule::date_label(self.scheduled_date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bento_bop_core::Price;

    fn sample_order(fulfillment: FulfillmentMethod) -> Order {
        Order {
            id: OrderId::generate(),
            lines: vec![CartLine {
                id: bento_bop_core::MenuItemId::new(1),
                name: "Classic Chicken Bento".to_string(),
                price: Price::from_cents(1299),
                quantity: 2,
                image: "/static/images/chicken-bento.jpg".to_string(),
            }],
            totals: CartTotals {
                subtotal: Price::from_cents(2598),
                delivery_fee: Price::from_cents(200),
                discount: Price::zero(),
                total: Price::from_cents(2798),
            },
            promo_code: None,
            fulfillment,
            location: None,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            contact: OrderContact {
                email: Email::parse("jane@example.com").unwrap(),
                phone: "+66812345678".to_string(),
            },
            address: OrderAddress {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                address: "123 Street".to_string(),
                city: "Bangkok".to_string(),
                postal_code: "10110".to_string(),
            },
            payment_method: PaymentMethod::Card,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_eta_label() {
        assert_eq!(
            sample_order(FulfillmentMethod::Pickup).eta_label(),
            "Ready for pickup at 1:00 PM"
        );
        assert_eq!(
            sample_order(FulfillmentMethod::Delivery).eta_label(),
            "Delivered within 2-4 hours of 1:00 PM"
        );
    }

    #[test]
    fn test_full_name() {
        let order = sample_order(FulfillmentMethod::Pickup);
        assert_eq!(order.address.full_name(), "Jane Doe");
    }

    #[test]
    fn test_order_serde_roundtrip() {
        let order = sample_order(FulfillmentMethod::Delivery);
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.number(), order.number());
        assert_eq!(parsed.totals, order.totals);
        assert_eq!(parsed.status, OrderStatus::Pending);
    }
}
