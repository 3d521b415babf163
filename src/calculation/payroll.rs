//! Forward payroll calculation.
//!
//! This module assembles the full monthly breakdown for one salary input:
//! gross and taxable base, the statutory deductions for the applicable tax
//! type, custom deductions, and the resulting net salary.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, Deductions, PayrollResult, SalaryInput, TaxType,
};

use super::employment_insurance::calculate_employment_insurance;
use super::health_insurance::calculate_health_insurance;
use super::income_tax::calculate_withholding;
use super::national_pension::calculate_national_pension;
use super::rounding::round_won;
use super::taxable_base::compute_taxable_base;

/// Warning code recorded when deductions exceed gross and the net is clamped.
pub const WARN_NEGATIVE_NET_CLAMPED: &str = "NEGATIVE_NET_CLAMPED";

/// Calculates the complete payroll breakdown for a salary input.
///
/// The computation is a pure function of its input and the rate table:
/// no I/O, no shared state. Employee income runs through the four social
/// insurances and the withholding schedule; business income (3.3%) gets the
/// flat 3% income tax plus 0.3% local surtax with all insurance fields zero.
/// Custom deductions and any meal-excess deduction are subtracted in full for
/// both tax types.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// when the input fails validation; the engine never clamps invalid amounts.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{SalaryInput, TaxType};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let config = ConfigLoader::load("./config/kr2025").unwrap();
/// let input = SalaryInput {
///     base_salary: Decimal::from(3_000_000),
///     allowances: BTreeMap::new(),
///     tax_type: TaxType::EmployeeIncome,
///     dependents_count: 1,
///     custom_deductions: BTreeMap::new(),
///     meal_excess_deduction: None,
/// };
/// let result = calculate_payroll(&input, config.latest()).unwrap();
/// assert_eq!(result.gross_salary, Decimal::from(3_000_000));
/// ```
pub fn calculate_payroll(input: &SalaryInput, rates: &RateTable) -> EngineResult<PayrollResult> {
    input.validate()?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let base_result = compute_taxable_base(input, step_number);
    steps.push(base_result.audit_step.clone());
    step_number += 1;

    let deductions = match input.tax_type {
        TaxType::EmployeeIncome => {
            let pension = calculate_national_pension(
                base_result.taxable_base,
                &rates.insurance.national_pension,
                step_number,
            );
            steps.push(pension.audit_step.clone());
            step_number += 1;

            let health = calculate_health_insurance(
                base_result.taxable_base,
                &rates.insurance.health,
                step_number,
            );
            step_number += health.audit_steps.len() as u32;
            steps.extend(health.audit_steps.clone());

            let employment = calculate_employment_insurance(
                base_result.taxable_base,
                &rates.insurance.employment,
                step_number,
            );
            steps.push(employment.audit_step.clone());
            step_number += 1;

            let withholding = calculate_withholding(
                base_result.taxable_base,
                input.dependents_count,
                &rates.income_tax,
                step_number,
            );
            step_number += withholding.audit_steps.len() as u32;
            steps.extend(withholding.audit_steps.clone());

            Deductions {
                national_pension: pension.amount,
                health_insurance: health.health_insurance,
                long_term_care_insurance: health.long_term_care_insurance,
                employment_insurance: employment.amount,
                income_tax: withholding.income_tax,
                local_income_tax: withholding.local_income_tax,
            }
        }
        TaxType::BusinessIncome3_3 => {
            let income_tax =
                round_won(base_result.gross_salary * rates.business_income.income_tax_rate);
            let local_income_tax =
                round_won(base_result.gross_salary * rates.business_income.local_income_tax_rate);

            steps.push(AuditStep {
                step_number,
                rule_id: "business_income_withholding".to_string(),
                rule_name: "Business Income Withholding (3.3%)".to_string(),
                statute_ref: "Income Tax Act art. 129".to_string(),
                input: serde_json::json!({
                    "gross_salary": base_result.gross_salary.to_string(),
                    "income_tax_rate": rates.business_income.income_tax_rate.to_string(),
                    "local_income_tax_rate":
                        rates.business_income.local_income_tax_rate.to_string(),
                }),
                output: serde_json::json!({
                    "income_tax": income_tax.to_string(),
                    "local_income_tax": local_income_tax.to_string(),
                }),
                reasoning: format!(
                    "Flat withholding on gross {}: {} income tax, {} local surtax; no social insurance",
                    base_result.gross_salary, income_tax, local_income_tax
                ),
            });
            step_number += 1;

            Deductions {
                income_tax,
                local_income_tax,
                ..Deductions::zero()
            }
        }
    };

    let custom_deductions_total = input.total_custom_deductions();
    let meal_excess_deduction = input.meal_excess_deduction.unwrap_or(Decimal::ZERO);
    let total_deductions =
        deductions.statutory_total() + custom_deductions_total + meal_excess_deduction;

    let raw_net = base_result.gross_salary - total_deductions;
    let net_clamped = raw_net < Decimal::ZERO;
    let net_salary = raw_net.max(Decimal::ZERO);

    if net_clamped {
        warnings.push(AuditWarning {
            code: WARN_NEGATIVE_NET_CLAMPED.to_string(),
            message: format!(
                "Total deductions {} exceed gross salary {}; net reported as 0",
                total_deductions, base_result.gross_salary
            ),
            severity: "high".to_string(),
        });
    }

    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        statute_ref: "Labor Standards Act art. 43".to_string(),
        input: serde_json::json!({
            "gross_salary": base_result.gross_salary.to_string(),
            "total_deductions": total_deductions.to_string(),
        }),
        output: serde_json::json!({
            "net_salary": net_salary.to_string(),
            "net_clamped": net_clamped,
        }),
        reasoning: format!(
            "{} - {} = {}",
            base_result.gross_salary, total_deductions, net_salary
        ),
    });

    Ok(PayrollResult {
        base_salary: input.base_salary,
        total_allowances: base_result.total_allowances,
        gross_salary: base_result.gross_salary,
        taxable_base: base_result.taxable_base,
        deductions,
        custom_deductions_total,
        meal_excess_deduction,
        total_deductions,
        net_salary,
        net_clamped,
        audit_trace: AuditTrace { steps, warnings },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
    use crate::models::AllowanceType;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::load("./config/kr2025").unwrap()
    }

    fn employee_input(base: Decimal) -> SalaryInput {
        SalaryInput {
            base_salary: base,
            allowances: BTreeMap::new(),
            tax_type: TaxType::EmployeeIncome,
            dependents_count: 1,
            custom_deductions: BTreeMap::new(),
            meal_excess_deduction: None,
        }
    }

    #[test]
    fn test_employee_with_exempt_meal_allowance() {
        let config = loader();
        let mut input = employee_input(dec("3000000"));
        input
            .allowances
            .insert(AllowanceType::Meal, dec("200000"));

        let result = calculate_payroll(&input, config.latest()).unwrap();

        assert_eq!(result.gross_salary, dec("3200000"));
        assert_eq!(result.taxable_base, dec("3000000"));
        assert_eq!(result.deductions.national_pension, dec("135000"));
        assert_eq!(result.deductions.health_insurance, dec("106350"));
        assert_eq!(result.deductions.long_term_care_insurance, dec("13772"));
        assert_eq!(result.deductions.employment_insurance, dec("27000"));
        assert_eq!(result.deductions.income_tax, dec("133458"));
        assert_eq!(result.deductions.local_income_tax, dec("13346"));
        assert_eq!(result.total_deductions, dec("428926"));
        assert_eq!(result.net_salary, dec("2771074"));
        assert!(!result.net_clamped);

        // Net lands in the plausible band for this income level.
        let ratio = result.net_salary / result.gross_salary;
        assert!(ratio > dec("0.85") && ratio < dec("0.92"), "ratio {}", ratio);
    }

    #[test]
    fn test_business_income_flat_withholding() {
        let config = loader();
        let mut input = employee_input(dec("1000000"));
        input.tax_type = TaxType::BusinessIncome3_3;

        let result = calculate_payroll(&input, config.latest()).unwrap();

        assert_eq!(result.deductions.income_tax, dec("30000"));
        assert_eq!(result.deductions.local_income_tax, dec("3000"));
        assert_eq!(result.deductions.national_pension, Decimal::ZERO);
        assert_eq!(result.deductions.health_insurance, Decimal::ZERO);
        assert_eq!(result.deductions.long_term_care_insurance, Decimal::ZERO);
        assert_eq!(result.deductions.employment_insurance, Decimal::ZERO);
        assert_eq!(result.total_deductions, dec("33000"));
        assert_eq!(result.net_salary, dec("967000"));
    }

    #[test]
    fn test_custom_deductions_subtracted_in_full() {
        let config = loader();
        let mut input = employee_input(dec("3000000"));
        input
            .custom_deductions
            .insert("union_dues".to_string(), dec("15000"));
        input
            .custom_deductions
            .insert("company_loan".to_string(), dec("100000"));

        let plain = calculate_payroll(&employee_input(dec("3000000")), config.latest()).unwrap();
        let result = calculate_payroll(&input, config.latest()).unwrap();

        assert_eq!(result.custom_deductions_total, dec("115000"));
        assert_eq!(
            result.total_deductions,
            plain.total_deductions + dec("115000")
        );
        assert_eq!(result.net_salary, plain.net_salary - dec("115000"));
    }

    #[test]
    fn test_meal_excess_deduction_applied() {
        let config = loader();
        let mut input = employee_input(dec("3000000"));
        input.meal_excess_deduction = Some(dec("42000"));

        let plain = calculate_payroll(&employee_input(dec("3000000")), config.latest()).unwrap();
        let result = calculate_payroll(&input, config.latest()).unwrap();

        assert_eq!(result.meal_excess_deduction, dec("42000"));
        assert_eq!(result.net_salary, plain.net_salary - dec("42000"));
    }

    #[test]
    fn test_negative_net_clamped_and_flagged() {
        let config = loader();
        let mut input = employee_input(dec("500000"));
        input
            .custom_deductions
            .insert("company_loan".to_string(), dec("2000000"));

        let result = calculate_payroll(&input, config.latest()).unwrap();

        assert_eq!(result.net_salary, Decimal::ZERO);
        assert!(result.net_clamped);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(
            result.audit_trace.warnings[0].code,
            WARN_NEGATIVE_NET_CLAMPED
        );
        assert_eq!(result.audit_trace.warnings[0].severity, "high");
    }

    #[test]
    fn test_zero_base_salary_is_valid() {
        let config = loader();
        let result = calculate_payroll(&employee_input(Decimal::ZERO), config.latest()).unwrap();

        assert_eq!(result.gross_salary, Decimal::ZERO);
        // Pension still applies at the statutory floor base.
        assert_eq!(result.deductions.national_pension, dec("18000"));
        assert_eq!(result.net_salary, Decimal::ZERO);
        assert!(result.net_clamped);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let config = loader();
        let mut input = employee_input(dec("3000000"));
        input.dependents_count = 0;

        assert!(calculate_payroll(&input, config.latest()).is_err());
    }

    #[test]
    fn test_extreme_base_rejected_before_annualisation() {
        let config = loader();
        // Near Decimal::MAX; the withholding schedule multiplies the taxable
        // base by twelve, which would overflow without the input bound.
        let input = employee_input(dec("70000000000000000000000000000"));

        match calculate_payroll(&input, config.latest()).unwrap_err() {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "base_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_gross_equals_base_plus_allowances() {
        let config = loader();
        let mut input = employee_input(dec("2500000"));
        input.allowances.insert(AllowanceType::Meal, dec("200000"));
        input
            .allowances
            .insert(AllowanceType::Overtime, dec("300000"));
        input.allowances.insert(AllowanceType::Bonus, dec("500000"));

        let result = calculate_payroll(&input, config.latest()).unwrap();

        assert_eq!(result.total_allowances, dec("1000000"));
        assert_eq!(result.gross_salary, dec("3500000"));
        assert_eq!(
            result.net_salary,
            result.gross_salary - result.total_deductions
        );
    }

    #[test]
    fn test_pension_ceiling_applies_at_high_salary() {
        let config = loader();
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let rates = config.rates_for(date).unwrap();

        let result = calculate_payroll(&employee_input(dec("10000000")), rates).unwrap();

        // Ceiling base 6,170,000 x 4.5% under the H1 table.
        assert_eq!(result.deductions.national_pension, dec("277650"));
    }

    #[test]
    fn test_audit_trace_steps_are_sequential() {
        let config = loader();
        let result = calculate_payroll(&employee_input(dec("3000000")), config.latest()).unwrap();

        let numbers: Vec<u32> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, expected);
    }
}
