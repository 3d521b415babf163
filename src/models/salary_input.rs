//! Salary input models.
//!
//! This module defines the [`SalaryInput`] value object consumed by the
//! forward calculator, the [`ReverseInput`] used by the reverse calculator,
//! and the [`TaxType`] classification that selects the deduction scheme.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::AllowanceType;

/// Selects which statutory deduction scheme applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    /// Regular employee: four social insurances plus withheld income tax.
    EmployeeIncome,
    /// Freelancer/business income: flat 3% income tax plus 0.3% local surtax.
    #[serde(rename = "business_income_3_3")]
    BusinessIncome3_3,
}

/// The immutable request object for a forward payroll calculation.
///
/// All monetary amounts are whole won; [`SalaryInput::validate`] rejects
/// negative or fractional amounts rather than clamping them.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AllowanceType, SalaryInput, TaxType};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut allowances = BTreeMap::new();
/// allowances.insert(AllowanceType::Meal, Decimal::from(200_000));
///
/// let input = SalaryInput {
///     base_salary: Decimal::from(3_000_000),
///     allowances,
///     tax_type: TaxType::EmployeeIncome,
///     dependents_count: 1,
///     custom_deductions: BTreeMap::new(),
///     meal_excess_deduction: None,
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Monthly base pay in whole won.
    pub base_salary: Decimal,
    /// Allowance amounts keyed by catalog category.
    #[serde(default)]
    pub allowances: BTreeMap<AllowanceType, Decimal>,
    /// The deduction scheme that applies.
    pub tax_type: TaxType,
    /// Number of dependents including the employee themselves (at least 1).
    pub dependents_count: u32,
    /// Administrator-defined deductions (union dues, loan repayments, ...),
    /// always subtracted in full.
    #[serde(default)]
    pub custom_deductions: BTreeMap<String, Decimal>,
    /// Extra deduction applied when meal-card spend exceeded the non-taxable
    /// meal allowance cap.
    #[serde(default)]
    pub meal_excess_deduction: Option<Decimal>,
}

/// The largest single amount the engine accepts, one quadrillion won.
///
/// Validation rejects anything above this bound before it can overflow the
/// decimal arithmetic in the annualised withholding schedule or the reverse
/// search.
pub fn max_supported_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_000i64)
}

/// Rejects amounts that are negative, not whole won, or absurdly large.
fn validate_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount.is_sign_negative() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "must not be negative".to_string(),
        });
    }
    if amount != amount.trunc() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "must be a whole currency amount".to_string(),
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

impl SalaryInput {
    /// Validates the input, naming the first offending field.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if any amount is negative or
    /// fractional, or if `dependents_count` is zero.
    pub fn validate(&self) -> EngineResult<()> {
        validate_amount("base_salary", self.base_salary)?;
        for (allowance, amount) in &self.allowances {
            validate_amount(&format!("allowances.{}", allowance.key()), *amount)?;
        }
        if self.dependents_count < 1 {
            return Err(EngineError::InvalidInput {
                field: "dependents_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        for (name, amount) in &self.custom_deductions {
            validate_amount(&format!("custom_deductions.{}", name), *amount)?;
        }
        if let Some(excess) = self.meal_excess_deduction {
            validate_amount("meal_excess_deduction", excess)?;
        }
        Ok(())
    }

    /// Sums all allowance values.
    pub fn total_allowances(&self) -> Decimal {
        self.allowances.values().copied().sum()
    }

    /// Sums all custom deduction values.
    pub fn total_custom_deductions(&self) -> Decimal {
        self.custom_deductions.values().copied().sum()
    }
}

/// The request object for a reverse payroll calculation.
///
/// Carries everything a [`SalaryInput`] does except the base salary, which is
/// the unknown being solved for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseInput {
    /// Allowance amounts keyed by catalog category.
    #[serde(default)]
    pub allowances: BTreeMap<AllowanceType, Decimal>,
    /// The deduction scheme that applies.
    pub tax_type: TaxType,
    /// Number of dependents including the employee themselves (at least 1).
    pub dependents_count: u32,
    /// Administrator-defined deductions, always subtracted in full.
    #[serde(default)]
    pub custom_deductions: BTreeMap<String, Decimal>,
    /// Extra deduction for meal-card spend above the non-taxable cap.
    #[serde(default)]
    pub meal_excess_deduction: Option<Decimal>,
}

impl ReverseInput {
    /// Materialises a full [`SalaryInput`] at a candidate base salary.
    pub fn with_base(&self, base_salary: Decimal) -> SalaryInput {
        SalaryInput {
            base_salary,
            allowances: self.allowances.clone(),
            tax_type: self.tax_type,
            dependents_count: self.dependents_count,
            custom_deductions: self.custom_deductions.clone(),
            meal_excess_deduction: self.meal_excess_deduction,
        }
    }
}
