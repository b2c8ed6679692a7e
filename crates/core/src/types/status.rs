//! Status and fulfillment enums shared across the ordering flow.

use serde::{Deserialize, Serialize};

/// Lifecycle of a placed (simulated) order.
///
/// Orders are created `Pending` and nothing advances them; the remaining
/// states exist so the confirmation and account screens can render the
/// full progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Human-facing label for templates.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::OutForDelivery => "Out for delivery",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::OutForDelivery => write!(f, "out-for-delivery"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "out-for-delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentMethod {
    /// Customer collects from a store location. Free.
    Pickup,
    /// Courier delivery to the customer's address.
    Delivery,
}

impl FulfillmentMethod {
    /// Human-facing label for templates.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "Store Pickup",
            Self::Delivery => "Delivery",
        }
    }
}

impl std::str::FromStr for FulfillmentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            _ => Err(format!("invalid fulfillment method: {s}")),
        }
    }
}

/// Simulated payment methods offered at checkout.
///
/// Nothing is ever charged; the variant only selects which form fields are
/// validated and what the order snapshot records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit / debit card (Visa, Mastercard, JCB).
    Card,
    /// PromptPay / mobile banking QR.
    PromptPay,
}

impl PaymentMethod {
    /// Human-facing label for templates.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit / Debit Card",
            Self::PromptPay => "PromptPay / Mobile Banking",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "promptpay" => Ok(Self::PromptPay),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_serde_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
    }

    #[test]
    fn test_fulfillment_method_from_str() {
        assert_eq!(
            "pickup".parse::<FulfillmentMethod>().unwrap(),
            FulfillmentMethod::Pickup
        );
        assert!("courier".parse::<FulfillmentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!(
            "promptpay".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::PromptPay
        );
        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
