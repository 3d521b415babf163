//! Health and long-term care insurance calculation.
//!
//! The health premium is a flat rate on the monthly taxable base. The
//! long-term care premium is derived from the rounded health premium, not
//! from the base directly.

use rust_decimal::Decimal;

use crate::config::HealthRates;
use crate::models::AuditStep;

use super::rounding::round_won;

/// The result of the health insurance calculation, including audit steps.
#[derive(Debug, Clone)]
pub struct HealthInsuranceResult {
    /// The employee health insurance premium.
    pub health_insurance: Decimal,
    /// The long-term care premium derived from the health premium.
    pub long_term_care_insurance: Decimal,
    /// The audit steps recording both premiums.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the employee health and long-term care insurance premiums.
///
/// Each premium is rounded half-up exactly once: the health premium from
/// `taxable_base x rate`, the long-term care premium from the already rounded
/// health premium times the care rate.
///
/// # Statute Reference
///
/// National Health Insurance Act art. 73; Long-Term Care Insurance Act art. 9
/// defines the care premium as a percentage of the health premium.
pub fn calculate_health_insurance(
    taxable_base: Decimal,
    rates: &HealthRates,
    step_number: u32,
) -> HealthInsuranceResult {
    let health_insurance = round_won(taxable_base * rates.employee_rate);
    let long_term_care_insurance = round_won(health_insurance * rates.long_term_care_rate);

    let health_step = AuditStep {
        step_number,
        rule_id: "health_insurance".to_string(),
        rule_name: "Health Insurance".to_string(),
        statute_ref: "National Health Insurance Act art. 73".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.to_string(),
            "employee_rate": rates.employee_rate.to_string(),
        }),
        output: serde_json::json!({
            "amount": health_insurance.to_string(),
        }),
        reasoning: format!(
            "{} x {} = {}",
            taxable_base,
            rates.employee_rate.normalize(),
            health_insurance
        ),
    };

    let care_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "long_term_care_insurance".to_string(),
        rule_name: "Long-Term Care Insurance".to_string(),
        statute_ref: "Long-Term Care Insurance Act art. 9".to_string(),
        input: serde_json::json!({
            "health_insurance": health_insurance.to_string(),
            "long_term_care_rate": rates.long_term_care_rate.to_string(),
        }),
        output: serde_json::json!({
            "amount": long_term_care_insurance.to_string(),
        }),
        reasoning: format!(
            "{} x {} = {} (derived from the health premium)",
            health_insurance,
            rates.long_term_care_rate.normalize(),
            long_term_care_insurance
        ),
    };

    HealthInsuranceResult {
        health_insurance,
        long_term_care_insurance,
        audit_steps: vec![health_step, care_step],
    }
}
