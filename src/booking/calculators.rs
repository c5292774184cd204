//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no API access. Every function is a
//! function of its arguments only, so recomputing a quote from the same form
//! snapshot always yields the same amounts.

use chrono::NaiveTime;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Volume discount policy
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    /// Discount applies when total people is strictly greater than this
    pub discount_threshold: u32,
    /// Fraction of the subtotal taken off (0.15 = 15%)
    pub discount_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            discount_threshold: 100,
            discount_rate: dec!(0.15),
        }
    }
}

impl PricingPolicy {
    pub fn qualifies(&self, total_people: Option<u32>) -> bool {
        total_people.is_some_and(|people| people > self.discount_threshold)
    }
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use eventbook_web::booking::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Subtotal of one service row.
///
/// An unresolved service or a missing quantity is "not yet priced" and yields
/// zero rather than an error.
pub fn service_subtotal(price_per_person: Option<Decimal>, quantity: Option<u32>) -> Decimal {
    match (price_per_person, quantity) {
        (Some(price), Some(quantity)) => round_money(price * Decimal::from(quantity), 2),
        _ => Decimal::ZERO,
    }
}

/// Wall-clock hours between two times of day on the same date.
///
/// Returns `None` when `start` does not strictly precede `end`.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> Option<Decimal> {
    if start >= end {
        return None;
    }
    let seconds = (end - start).num_seconds();
    Some(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
}

/// Time-based venue cost; zero when the window is missing or inverted.
pub fn venue_cost(price_per_hour: Decimal, window: Option<(NaiveTime, NaiveTime)>) -> Decimal {
    window
        .and_then(|(start, end)| hours_between(start, end))
        .map(|hours| price_per_hour * hours)
        .unwrap_or(Decimal::ZERO)
}

/// Quote a booking from its row subtotals and venue cost.
///
/// The aggregate subtotal is rounded to cents before the discount is taken,
/// and the total is `subtotal - discount` so the two always add up.
pub fn calculate_quote(
    row_subtotals: &[Decimal],
    venue_cost: Decimal,
    total_people: Option<u32>,
    policy: &PricingPolicy,
) -> PricingQuote {
    let services_total: Decimal = row_subtotals.iter().copied().sum();
    let subtotal = round_money(services_total + venue_cost, 2);

    let discount = if policy.qualifies(total_people) {
        round_money(subtotal * policy.discount_rate, 2)
    } else {
        Decimal::ZERO
    };

    PricingQuote {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

/// Result of a pricing calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PricingQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
