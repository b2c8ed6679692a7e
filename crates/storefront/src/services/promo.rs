//! Promo code lookup.
//!
//! Codes are a static string-to-discount-amount table. Matching is
//! case-insensitive; anything not in the table simply does not exist.

use bento_bop_core::Price;

/// The promo table: canonical code → flat discount in cents.
const PROMO_CODES: &[(&str, i64)] = &[("BENTO20", 2000)];

/// Look up a promo code.
///
/// Returns the canonical (uppercase) code and its discount amount, or
/// `None` for codes not in the table. Input is trimmed and matched
/// case-insensitively.
#[must_use]
pub fn lookup(code: &str) -> Option<(&'static str, Price)> {
    let normalized = code.trim().to_uppercase();
    PROMO_CODES
        .iter()
        .find(|(canonical, _)| *canonical == normalized)
        .map(|&(canonical, cents)| (canonical, Price::from_cents(cents)))
}
