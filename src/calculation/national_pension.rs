//! National pension contribution calculation.
//!
//! The employee share is a flat rate on the monthly taxable base, with the
//! base clamped to the statutory floor and ceiling before the rate applies.

use rust_decimal::Decimal;

use crate::config::PensionRates;
use crate::models::AuditStep;

use super::rounding::round_won;

/// The result of the national pension calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct NationalPensionResult {
    /// The employee contribution amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employee national pension contribution.
///
/// The contribution base is `taxable_base` clamped to
/// `[monthly_base_floor, monthly_base_ceiling]`; the contribution is the
/// employee rate applied to the clamped base, rounded half-up once.
///
/// # Statute Reference
///
/// National Pension Act art. 88 sets the contribution rate and the annually
/// reindexed base caps.
pub fn calculate_national_pension(
    taxable_base: Decimal,
    rates: &PensionRates,
    step_number: u32,
) -> NationalPensionResult {
    let clamped_base = taxable_base
        .max(rates.monthly_base_floor)
        .min(rates.monthly_base_ceiling);
    let amount = round_won(clamped_base * rates.employee_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "national_pension".to_string(),
        rule_name: "National Pension".to_string(),
        statute_ref: "National Pension Act art. 88".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.to_string(),
            "employee_rate": rates.employee_rate.to_string(),
            "monthly_base_floor": rates.monthly_base_floor.to_string(),
            "monthly_base_ceiling": rates.monthly_base_ceiling.to_string(),
        }),
        output: serde_json::json!({
            "contribution_base": clamped_base.to_string(),
            "amount": amount.to_string(),
            "base_clamped": clamped_base != taxable_base,
        }),
        reasoning: format!(
            "{} x {} = {} on a contribution base of {}",
            clamped_base,
            rates.employee_rate.normalize(),
            amount,
            clamped_base
        ),
    };

    NationalPensionResult { amount, audit_step }
}
