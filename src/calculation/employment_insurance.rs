//! Employment insurance contribution calculation.
//!
//! The employee share is a flat rate on the monthly taxable base with no
//! floor or ceiling.

use rust_decimal::Decimal;

use crate::config::EmploymentRates;
use crate::models::AuditStep;

use super::rounding::round_won;

/// The result of the employment insurance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct EmploymentInsuranceResult {
    /// The employee contribution amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employee employment insurance contribution.
///
/// # Statute Reference
///
/// Employment Insurance Act art. 14 sets the unemployment-benefit
/// contribution rate borne by the employee.
pub fn calculate_employment_insurance(
    taxable_base: Decimal,
    rates: &EmploymentRates,
    step_number: u32,
) -> EmploymentInsuranceResult {
    let amount = round_won(taxable_base * rates.employee_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "employment_insurance".to_string(),
        rule_name: "Employment Insurance".to_string(),
        statute_ref: "Employment Insurance Act art. 14".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.to_string(),
            "employee_rate": rates.employee_rate.to_string(),
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
        }),
        reasoning: format!(
            "{} x {} = {}",
            taxable_base,
            rates.employee_rate.normalize(),
            amount
        ),
    };

    EmploymentInsuranceResult { amount, audit_step }
}
