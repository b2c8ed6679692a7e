//! Business logic services for the storefront.

pub mod checkout;
pub mod promo;
pub mod schedule;
