//! Simplified monthly income-tax withholding.
//!
//! The monthly withholding is derived from the statutory annual schedule:
//! the taxable monthly base is annualised, reduced by the earned-income and
//! personal deductions, run through the progressive brackets, reduced by the
//! earned-income tax credit, and divided back into a monthly amount. The
//! local income tax is a fixed 10% surtax on the result.
//!
//! This is a business tool, not a tax authority: the official withholding
//! table is approximated by this monotonic formula, with every parameter
//! sourced from the configured rate table.

use rust_decimal::Decimal;

use crate::config::IncomeTaxTable;
use crate::models::AuditStep;

use super::rounding::round_won;

/// The result of the withholding calculation, including audit steps.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Monthly withheld national income tax.
    pub income_tax: Decimal,
    /// Monthly local income tax (10% surtax).
    pub local_income_tax: Decimal,
    /// The audit steps recording both amounts.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the annual earned-income deduction for a given annual salary.
///
/// The schedule is piecewise linear and capped; Income Tax Act art. 47.
pub fn earned_income_deduction(annual_salary: Decimal, table: &IncomeTaxTable) -> Decimal {
    let band = table
        .earned_income_deduction
        .iter()
        .rev()
        .find(|band| annual_salary >= band.over)
        .unwrap_or(&table.earned_income_deduction[0]);

    let deduction = band.base + band.rate * (annual_salary - band.over);
    deduction.min(table.earned_income_deduction_cap)
}

/// Applies the progressive bracket schedule to an annual taxable income.
pub fn progressive_tax(taxable_income: Decimal, table: &IncomeTaxTable) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let bracket = table
        .brackets
        .iter()
        .rev()
        .find(|bracket| taxable_income >= bracket.over)
        .unwrap_or(&table.brackets[0]);

    bracket.base_tax + bracket.rate * (taxable_income - bracket.over)
}

/// Computes the earned-income tax credit for a computed annual tax.
///
/// The credit is 55% of the computed tax up to the threshold, then 30% of the
/// excess on top of a fixed base, limited by a ceiling that tapers with the
/// annual salary; Income Tax Act art. 59.
pub fn earned_income_tax_credit(
    computed_tax: Decimal,
    annual_salary: Decimal,
    table: &IncomeTaxTable,
) -> Decimal {
    if computed_tax <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let credit_cfg = &table.tax_credit;
    let uncapped = if computed_tax <= credit_cfg.threshold {
        credit_cfg.rate_below * computed_tax
    } else {
        credit_cfg.base_above + credit_cfg.rate_above * (computed_tax - credit_cfg.threshold)
    };

    let cap_band = credit_cfg
        .caps
        .iter()
        .rev()
        .find(|cap| annual_salary >= cap.over)
        .unwrap_or(&credit_cfg.caps[0]);
    let cap = (cap_band.base - cap_band.reduction_rate * (annual_salary - cap_band.over))
        .max(cap_band.floor);

    uncapped.min(cap)
}

/// Calculates the monthly income tax and local income tax withholding.
///
/// # Arguments
///
/// * `taxable_base` - The taxable monthly base (gross minus exempt allowances)
/// * `dependents_count` - Dependents including the employee, at least 1
/// * `table` - The income-tax schedule from the effective rate table
/// * `step_number` - The step number for audit trail sequencing
///
/// The function is monotonic: a higher taxable base never produces a lower
/// withholding.
pub fn calculate_withholding(
    taxable_base: Decimal,
    dependents_count: u32,
    table: &IncomeTaxTable,
    step_number: u32,
) -> IncomeTaxResult {
    let annual_salary = taxable_base * Decimal::from(12);
    let deduction = earned_income_deduction(annual_salary, table);
    let personal_deduction =
        table.personal_deduction_per_dependent * Decimal::from(dependents_count);
    let taxable_income = (annual_salary - deduction - personal_deduction).max(Decimal::ZERO);

    let computed_tax = progressive_tax(taxable_income, table);
    let credit = earned_income_tax_credit(computed_tax, annual_salary, table);
    let determined_tax = (computed_tax - credit).max(Decimal::ZERO);

    let income_tax = round_won(determined_tax / Decimal::from(12));
    let local_income_tax = round_won(income_tax * table.local_surtax_rate);

    let income_tax_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        statute_ref: "Income Tax Act art. 134".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.to_string(),
            "dependents_count": dependents_count,
        }),
        output: serde_json::json!({
            "annual_salary": annual_salary.normalize().to_string(),
            "earned_income_deduction": deduction.normalize().to_string(),
            "personal_deduction": personal_deduction.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string(),
            "computed_tax": computed_tax.normalize().to_string(),
            "tax_credit": credit.normalize().to_string(),
            "amount": income_tax.to_string(),
        }),
        reasoning: format!(
            "Annualised {} less deductions leaves {}; schedule gives {} less {} credit, withheld monthly as {}",
            annual_salary.normalize(),
            taxable_income.normalize(),
            computed_tax.normalize(),
            credit.normalize(),
            income_tax
        ),
    };

    let local_tax_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "local_income_tax".to_string(),
        rule_name: "Local Income Tax".to_string(),
        statute_ref: "Local Tax Act art. 103-13".to_string(),
        input: serde_json::json!({
            "income_tax": income_tax.to_string(),
            "local_surtax_rate": table.local_surtax_rate.to_string(),
        }),
        output: serde_json::json!({
            "amount": local_income_tax.to_string(),
        }),
        reasoning: format!(
            "{} x {} = {}",
            income_tax,
            table.local_surtax_rate.normalize(),
            local_income_tax
        ),
    };

    IncomeTaxResult {
        income_tax,
        local_income_tax,
        audit_steps: vec![income_tax_step, local_tax_step],
    }
}
