//! Salary basis conversions.
//!
//! Annual, hourly, and daily figures are normalized to the monthly base the
//! calculators operate on. The statutory month is 209 hours: 40 ordinary
//! hours plus the 8-hour paid weekly rest day, times the average 4.345 weeks
//! per month, rounded to a whole hour. The working-days figure is the same
//! month expressed in 8-hour days (209 / 8 = 26.125).

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::max_supported_amount;

use super::rounding::round_won;

/// The statutory monthly working hours used for hourly conversion.
pub fn standard_monthly_hours() -> Decimal {
    Decimal::from(209)
}

/// The statutory month expressed in 8-hour working days.
pub fn working_days_per_month() -> Decimal {
    Decimal::new(26_125, 3)
}

// Conversions run before `SalaryInput::validate`, so they carry their own
// amount guard.
fn require_in_range(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount.is_sign_negative() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "must not be negative".to_string(),
        });
    }
    if amount > max_supported_amount() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "exceeds the supported maximum amount".to_string(),
        });
    }
    Ok(())
}

/// Converts an annual salary to its monthly equivalent, rounded to whole won.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `annual_salary` is negative or above the
/// supported maximum.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::annual_to_monthly;
/// use rust_decimal::Decimal;
///
/// let monthly = annual_to_monthly(Decimal::from(120_000_000)).unwrap();
/// assert_eq!(monthly, Decimal::from(10_000_000));
/// ```
pub fn annual_to_monthly(annual_salary: Decimal) -> EngineResult<Decimal> {
    require_in_range("annual_salary", annual_salary)?;
    Ok(round_won(annual_salary / Decimal::from(12)))
}

/// Converts an hourly wage to the monthly equivalent over the 209-hour
/// statutory month, rounded to whole won.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `hourly_wage` is negative or above the
/// supported maximum.
pub fn hourly_to_monthly(hourly_wage: Decimal) -> EngineResult<Decimal> {
    require_in_range("hourly_wage", hourly_wage)?;
    Ok(round_won(hourly_wage * standard_monthly_hours()))
}

/// Converts a daily wage to the monthly equivalent over 26.125 working days,
/// rounded to whole won.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `daily_wage` is negative or above the
/// supported maximum.
pub fn daily_to_monthly(daily_wage: Decimal) -> EngineResult<Decimal> {
    require_in_range("daily_wage", daily_wage)?;
    Ok(round_won(daily_wage * working_days_per_month()))
}
