//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] and [`ReverseResult`] types that
//! capture the outputs of the forward and reverse calculations, including the
//! statutory deduction breakdown and the audit trace recording every rule
//! application.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The statutory deduction breakdown of a payroll calculation.
///
/// For [`TaxType::BusinessIncome3_3`](super::TaxType::BusinessIncome3_3) the
/// four insurance fields are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// National pension contribution (employee share).
    pub national_pension: Decimal,
    /// Health insurance premium (employee share).
    pub health_insurance: Decimal,
    /// Long-term care insurance, derived from the health premium.
    pub long_term_care_insurance: Decimal,
    /// Employment insurance contribution (employee share).
    pub employment_insurance: Decimal,
    /// Withheld national income tax.
    pub income_tax: Decimal,
    /// Local income tax (10% surtax on the national income tax).
    pub local_income_tax: Decimal,
}

impl Deductions {
    /// A breakdown with every field zero.
    pub fn zero() -> Self {
        Self {
            national_pension: Decimal::ZERO,
            health_insurance: Decimal::ZERO,
            long_term_care_insurance: Decimal::ZERO,
            employment_insurance: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            local_income_tax: Decimal::ZERO,
        }
    }

    /// Sums the six statutory fields.
    pub fn statutory_total(&self) -> Decimal {
        self.national_pension
            + self.health_insurance
            + self.long_term_care_insurance
            + self.employment_insurance
            + self.income_tax
            + self.local_income_tax
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute underpinning this rule.
    pub statute_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that do not prevent calculation but must be
/// surfaced to the caller, such as deductions exceeding gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Records every decision made during the calculation process for
/// transparency and compliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a forward payroll calculation.
///
/// All amounts are whole won. Invariants:
/// `gross_salary == base_salary + total_allowances` and
/// `net_salary == max(0, gross_salary - total_deductions)`; when the clamp
/// fires, `net_clamped` is set and a warning is recorded in the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The monthly base salary the calculation started from.
    pub base_salary: Decimal,
    /// Sum of all allowance amounts.
    pub total_allowances: Decimal,
    /// Base salary plus allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus the non-taxable portion of each allowance.
    pub taxable_base: Decimal,
    /// The statutory deduction breakdown.
    pub deductions: Deductions,
    /// Sum of all administrator-defined deductions.
    pub custom_deductions_total: Decimal,
    /// Meal-card deduction for spend above the non-taxable cap, if any.
    pub meal_excess_deduction: Decimal,
    /// Statutory, custom, and meal-excess deductions combined.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions, floored at zero.
    pub net_salary: Decimal,
    /// True when deductions exceeded gross and the net was clamped to zero.
    pub net_clamped: bool,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// The result of a reverse payroll calculation.
///
/// Produced by bisection over the forward calculation; `base_salary` is the
/// smallest whole-won base whose net meets the target, so the guaranteed net
/// is never under-paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseResult {
    /// The solved-for base salary.
    pub base_salary: Decimal,
    /// The net salary the solved base actually produces.
    pub calculated_net: Decimal,
    /// `calculated_net - target_net`, signed.
    pub difference: Decimal,
    /// False when the iteration cap was hit before reaching the one-won
    /// tolerance; the result is then the best estimate found.
    pub converged: bool,
    /// Number of bisection iterations performed.
    pub iterations: u32,
    /// The complete forward breakdown at the solved base.
    pub result: PayrollResult,
}
