//! Monetary rounding policy.
//!
//! Every statutory deduction is rounded to the nearest whole won using
//! round-half-up, applied exactly once per output field. Intermediate values
//! keep full precision; rounding a value twice compounds the error.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to the nearest whole won, half away from zero.
///
/// All monetary values in the engine are non-negative, so midpoint-away-
/// from-zero is round-half-up here.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_won;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_won(Decimal::from_str("13772.325").unwrap()), Decimal::from(13772));
/// assert_eq!(round_won(Decimal::from_str("19312.5").unwrap()), Decimal::from(19313));
/// ```
pub fn round_won(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
