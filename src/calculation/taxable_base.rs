//! Taxable base determination.
//!
//! This module computes the income-tax base from gross salary: each allowance
//! category is exempt only up to its statutory non-taxable cap, and amounts
//! above the cap remain taxable.

use rust_decimal::Decimal;

use crate::models::{AuditStep, SalaryInput};

/// The result of the taxable base computation, including the audit step.
#[derive(Debug, Clone)]
pub struct TaxableBaseResult {
    /// Sum of all allowance amounts.
    pub total_allowances: Decimal,
    /// Base salary plus allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus the exempt portion of each allowance.
    pub taxable_base: Decimal,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
}

/// Computes the gross salary and the taxable base for income tax.
///
/// For each allowance category present, `min(amount, cap)` is exempt; the
/// insurance contributions and the withholding schedule both apply to the
/// resulting taxable base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_taxable_base;
/// use payroll_engine::models::{AllowanceType, SalaryInput, TaxType};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut allowances = BTreeMap::new();
/// allowances.insert(AllowanceType::Meal, Decimal::from(300_000));
///
/// let input = SalaryInput {
///     base_salary: Decimal::from(3_000_000),
///     allowances,
///     tax_type: TaxType::EmployeeIncome,
///     dependents_count: 1,
///     custom_deductions: BTreeMap::new(),
///     meal_excess_deduction: None,
/// };
///
/// let result = compute_taxable_base(&input, 1);
/// assert_eq!(result.gross_salary, Decimal::from(3_300_000));
/// // Only 200,000 of the meal allowance is exempt.
/// assert_eq!(result.taxable_base, Decimal::from(3_100_000));
/// ```
pub fn compute_taxable_base(input: &SalaryInput, step_number: u32) -> TaxableBaseResult {
    let total_allowances = input.total_allowances();
    let gross_salary = input.base_salary + total_allowances;

    let exempt_total: Decimal = input
        .allowances
        .iter()
        .map(|(allowance, amount)| (*amount).min(allowance.non_taxable_limit()))
        .sum();

    let taxable_base = gross_salary - exempt_total;

    let exempt_breakdown: serde_json::Map<String, serde_json::Value> = input
        .allowances
        .iter()
        .filter(|(allowance, _)| allowance.non_taxable_limit() > Decimal::ZERO)
        .map(|(allowance, amount)| {
            (
                allowance.key().to_string(),
                serde_json::Value::String(
                    (*amount).min(allowance.non_taxable_limit()).to_string(),
                ),
            )
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "taxable_base".to_string(),
        rule_name: "Taxable Base".to_string(),
        statute_ref: "Income Tax Act art. 12".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.to_string(),
            "total_allowances": total_allowances.to_string(),
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "exempt_total": exempt_total.to_string(),
            "exempt_by_category": exempt_breakdown,
            "taxable_base": taxable_base.to_string(),
        }),
        reasoning: format!(
            "Gross {} minus {} non-taxable allowances leaves a taxable base of {}",
            gross_salary, exempt_total, taxable_base
        ),
    };

    TaxableBaseResult {
        total_allowances,
        gross_salary,
        taxable_base,
        audit_step,
    }
}
