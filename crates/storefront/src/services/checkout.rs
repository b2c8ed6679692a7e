//! Checkout form validation.
//!
//! Server-side validation for the multi-step checkout form. Field failures
//! are collected per-field so the template can re-render every message at
//! once, the way the original form behaves.
//!
//! Payment details are simulated: card fields are validated for shape and
//! then discarded; nothing is charged or stored.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use bento_bop_core::{Email, PaymentMethod};

use crate::models::{OrderAddress, OrderContact};

/// Raw checkout form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub card_expiry: String,
    #[serde(default)]
    pub card_cvc: String,
}

/// Per-field validation messages; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub payment_method: Option<String>,
    pub card_number: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvc: Option<String>,
}

impl FieldErrors {
    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A validated checkout: typed contact, address, and payment method.
#[derive(Debug, Clone)]
pub struct ValidCheckout {
    pub contact: OrderContact,
    pub address: OrderAddress,
    pub payment_method: PaymentMethod,
}

/// Validate the whole form.
///
/// `today` anchors the card expiry check.
///
/// # Errors
///
/// Returns the per-field messages when any field fails.
pub fn validate(form: &CheckoutForm, today: NaiveDate) -> Result<ValidCheckout, FieldErrors> {
    let mut errors = FieldErrors::default();

    let email = match Email::parse(&form.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.email = Some(e.to_string());
            None
        }
    };

    errors.phone = validate_phone(&form.phone).err();
    errors.first_name = validate_required(&form.first_name, "First name").err();
    errors.last_name = validate_required(&form.last_name, "Last name").err();
    errors.address = validate_required(&form.address, "Address").err();
    errors.city = validate_required(&form.city, "City").err();
    errors.postal_code = validate_required(&form.postal_code, "Postal code").err();

    let payment_method = match form.payment_method.parse::<PaymentMethod>() {
        Ok(method) => Some(method),
        Err(_) => {
            errors.payment_method = Some("Please select a payment method".to_string());
            None
        }
    };

    if payment_method == Some(PaymentMethod::Card) {
        errors.card_number = validate_card_number(&form.card_number).err();
        errors.card_expiry = validate_card_expiry(&form.card_expiry, today).err();
        errors.card_cvc = validate_card_cvc(&form.card_cvc).err();
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Unreachable when errors is empty, but keeps the types honest.
    let (Some(email), Some(payment_method)) = (email, payment_method) else {
        return Err(errors);
    };

    Ok(ValidCheckout {
        contact: OrderContact {
            email,
            phone: normalize_phone(&form.phone),
        },
        address: OrderAddress {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            address: form.address.trim().to_string(),
            city: form.city.trim().to_string(),
            postal_code: form.postal_code.trim().to_string(),
        },
        payment_method,
    })
}

/// Strip the separators people type into phone numbers.
fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn validate_required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(())
    }
}

fn validate_phone(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Err("Phone is required".to_string());
    }
    let normalized = normalize_phone(raw);
    let digits = normalized.trim_start_matches('+');
    if digits.len() < 7 || digits.len() > 15 || digits.chars().any(|c| !c.is_ascii_digit()) {
        return Err("Enter a valid phone number".to_string());
    }
    Ok(())
}

fn validate_card_number(raw: &str) -> Result<(), String> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Err("Card number is required".to_string());
    }
    if digits.len() < 13 || digits.len() > 19 || digits.chars().any(|c| !c.is_ascii_digit()) {
        return Err("Enter a valid card number".to_string());
    }
    Ok(())
}

fn validate_card_expiry(raw: &str, today: NaiveDate) -> Result<(), String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Expiry is required".to_string());
    }
    let Some((month_str, year_str)) = raw.split_once('/') else {
        return Err("Use MM/YY format".to_string());
    };
    let (Ok(month), Ok(year)) = (month_str.parse::<u32>(), year_str.parse::<i32>()) else {
        return Err("Use MM/YY format".to_string());
    };
    if !(1..=12).contains(&month) || year_str.len() != 2 {
        return Err("Use MM/YY format".to_string());
    }
    let full_year = 2000 + year;
    if (full_year, month) < (today.year(), today.month()) {
        return Err("Card has expired".to_string());
    }
    Ok(())
}

fn validate_card_cvc(raw: &str) -> Result<(), String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("CVC is required".to_string());
    }
    if !(3..=4).contains(&raw.len()) || raw.chars().any(|c| !c.is_ascii_digit()) {
        return Err("Enter a valid CVC".to_string());
    }
    Ok(())
}
