//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices and order totals are exact decimal amounts; floating point
//! never enters the math. Prices render as `$12.99` via [`std::fmt::Display`].

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price from a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code: CurrencyCode::USD,
        }
    }

    /// The zero price in USD.
    #[must_use]
    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Whether this price is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// This price multiplied by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Subtract `other`, clamping at zero.
    ///
    /// Used for discount application: a discount larger than the total
    /// yields a free order, never a negative one.
    #[must_use]
    pub fn saturating_sub(&self, other: Self) -> Self {
        let amount = (self.amount - other.amount).max(Decimal::ZERO);
        Self {
            amount,
            currency_code: self.currency_code,
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self {
            amount: self.amount + rhs.amount,
            currency_code: self.currency_code,
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(1299).to_string(), "$12.99");
        assert_eq!(Price::from_cents(200).to_string(), "$2.00");
        assert_eq!(Price::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_times() {
        let line_total = Price::from_cents(1299).times(3);
        assert_eq!(line_total, Price::from_cents(3897));
    }

    #[test]
    fn test_sum() {
        let subtotal: Price = [Price::from_cents(1299), Price::from_cents(499)]
            .into_iter()
            .sum();
        assert_eq!(subtotal, Price::from_cents(1798));
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let total = Price::from_cents(1500);
        assert_eq!(
            total.saturating_sub(Price::from_cents(2000)),
            Price::zero()
        );
        assert_eq!(
            total.saturating_sub(Price::from_cents(500)),
            Price::from_cents(1000)
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::from_cents(1499);
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(CurrencyCode::USD.symbol(), "$");
        assert_eq!(CurrencyCode::USD.code(), "USD");
    }
}
