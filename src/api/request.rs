//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/reverse-calculate` endpoints.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{annual_to_monthly, daily_to_monthly, hourly_to_monthly};
use crate::error::EngineResult;
use crate::models::{AllowanceType, ReverseInput, SalaryInput, TaxType};

/// The pay basis the submitted base salary is expressed in.
///
/// Anything other than `Monthly` is normalized to a monthly amount before
/// calculation: annual divides by 12, hourly multiplies by the 209-hour
/// statutory month, daily multiplies by 26.125 working days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBasis {
    /// Monthly base pay, used as-is.
    #[default]
    Monthly,
    /// Annual salary.
    Annual,
    /// Hourly wage.
    Hourly,
    /// Daily wage.
    Daily,
}

impl SalaryBasis {
    /// Normalizes an amount on this basis to its monthly equivalent.
    pub fn to_monthly(self, amount: Decimal) -> EngineResult<Decimal> {
        match self {
            SalaryBasis::Monthly => Ok(amount),
            SalaryBasis::Annual => annual_to_monthly(amount),
            SalaryBasis::Hourly => hourly_to_monthly(amount),
            SalaryBasis::Daily => daily_to_monthly(amount),
        }
    }
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The base salary on the requested basis.
    pub base_salary: Decimal,
    /// The basis `base_salary` is expressed in. Defaults to monthly.
    #[serde(default)]
    pub salary_basis: SalaryBasis,
    /// Allowance amounts keyed by catalog category.
    #[serde(default)]
    pub allowances: BTreeMap<AllowanceType, Decimal>,
    /// The deduction scheme that applies.
    pub tax_type: TaxType,
    /// Number of dependents including the employee themselves.
    pub dependents_count: u32,
    /// Administrator-defined deductions, subtracted in full.
    #[serde(default)]
    pub custom_deductions: BTreeMap<String, Decimal>,
    /// Extra deduction for meal-card spend above the non-taxable cap.
    #[serde(default)]
    pub meal_excess_deduction: Option<Decimal>,
    /// The date selecting the statutory rate table. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

impl CalculationRequest {
    /// Converts the request into the engine's input type, normalizing the
    /// base salary to a monthly amount.
    pub fn into_salary_input(self) -> EngineResult<SalaryInput> {
        let base_salary = self.salary_basis.to_monthly(self.base_salary)?;
        Ok(SalaryInput {
            base_salary,
            allowances: self.allowances,
            tax_type: self.tax_type,
            dependents_count: self.dependents_count,
            custom_deductions: self.custom_deductions,
            meal_excess_deduction: self.meal_excess_deduction,
        })
    }
}

/// Request body for the `/reverse-calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseRequest {
    /// The desired monthly net pay.
    pub target_net: Decimal,
    /// Allowance amounts keyed by catalog category.
    #[serde(default)]
    pub allowances: BTreeMap<AllowanceType, Decimal>,
    /// The deduction scheme that applies.
    pub tax_type: TaxType,
    /// Number of dependents including the employee themselves.
    pub dependents_count: u32,
    /// Administrator-defined deductions, subtracted in full.
    #[serde(default)]
    pub custom_deductions: BTreeMap<String, Decimal>,
    /// Extra deduction for meal-card spend above the non-taxable cap.
    #[serde(default)]
    pub meal_excess_deduction: Option<Decimal>,
    /// The date selecting the statutory rate table. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}

impl ReverseRequest {
    /// Extracts the fields carried through the reverse search.
    pub fn reverse_input(&self) -> ReverseInput {
        ReverseInput {
            allowances: self.allowances.clone(),
            tax_type: self.tax_type,
            dependents_count: self.dependents_count,
            custom_deductions: self.custom_deductions.clone(),
            meal_excess_deduction: self.meal_excess_deduction,
        }
    }
}
