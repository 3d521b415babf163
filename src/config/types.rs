//! Configuration types for statutory rate tables.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Rates and tax schedules
//! change by statute, so they live in versioned rate tables keyed by
//! effective date rather than in code.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the statutory scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// ISO country code of the scheme (e.g., "KR").
    pub country: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or base year of the scheme.
    pub version: String,
    /// URL to the official schedule documentation.
    pub source_url: String,
}

/// National pension contribution parameters (employee share).
///
/// The contribution base is clamped to a statutory floor and ceiling before
/// the rate is applied.
#[derive(Debug, Clone, Deserialize)]
pub struct PensionRates {
    /// Employee contribution rate (e.g., 0.045 for 4.5%).
    pub employee_rate: Decimal,
    /// Minimum monthly contribution base.
    pub monthly_base_floor: Decimal,
    /// Maximum monthly contribution base.
    pub monthly_base_ceiling: Decimal,
}

/// Health insurance parameters (employee share).
#[derive(Debug, Clone, Deserialize)]
pub struct HealthRates {
    /// Employee premium rate (e.g., 0.03545 for 3.545%).
    pub employee_rate: Decimal,
    /// Long-term care rate applied to the health premium, not to the base.
    pub long_term_care_rate: Decimal,
}

/// Employment insurance parameters (employee share).
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentRates {
    /// Employee contribution rate (e.g., 0.009 for 0.9%).
    pub employee_rate: Decimal,
}

/// The four social insurance parameter sets.
#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceRates {
    /// National pension parameters.
    pub national_pension: PensionRates,
    /// Health insurance parameters (long-term care included).
    pub health: HealthRates,
    /// Employment insurance parameters.
    pub employment: EmploymentRates,
}

/// One band of the earned-income deduction schedule.
///
/// For an annual salary `s` falling in this band, the deduction is
/// `base + rate * (s - over)`.
#[derive(Debug, Clone, Deserialize)]
pub struct EarnedIncomeDeductionBand {
    /// Lower bound of the band (exclusive of lower bands).
    pub over: Decimal,
    /// Deduction accumulated by the lower bands.
    pub base: Decimal,
    /// Marginal deduction rate within this band.
    pub rate: Decimal,
}

/// One bracket of the progressive income-tax schedule.
///
/// For a taxable income `t` in this bracket, the tax is
/// `base_tax + rate * (t - over)`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket.
    pub over: Decimal,
    /// Tax accumulated by the lower brackets.
    pub base_tax: Decimal,
    /// Marginal tax rate within this bracket.
    pub rate: Decimal,
}

/// One band of the earned-income tax-credit ceiling schedule.
///
/// For an annual salary `s` in this band, the ceiling is
/// `max(floor, base - reduction_rate * (s - over))`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxCreditCap {
    /// Lower salary bound of the band.
    pub over: Decimal,
    /// Ceiling at the start of the band.
    pub base: Decimal,
    /// Rate at which the ceiling tapers within the band.
    pub reduction_rate: Decimal,
    /// Minimum ceiling within the band.
    pub floor: Decimal,
}

/// Earned-income tax-credit parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxCreditConfig {
    /// Computed-tax threshold below which the lower credit rate applies.
    pub threshold: Decimal,
    /// Credit rate on computed tax up to the threshold (e.g., 0.55).
    pub rate_below: Decimal,
    /// Fixed credit at the threshold.
    pub base_above: Decimal,
    /// Credit rate on computed tax above the threshold (e.g., 0.30).
    pub rate_above: Decimal,
    /// Salary-dependent ceiling bands, ascending by `over`.
    pub caps: Vec<TaxCreditCap>,
}

/// The simplified income-tax withholding schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxTable {
    /// Annual personal deduction per dependent (self included).
    pub personal_deduction_per_dependent: Decimal,
    /// Earned-income deduction bands, ascending by `over`.
    pub earned_income_deduction: Vec<EarnedIncomeDeductionBand>,
    /// Statutory cap on the earned-income deduction.
    pub earned_income_deduction_cap: Decimal,
    /// Progressive tax brackets, ascending by `over`.
    pub brackets: Vec<TaxBracket>,
    /// Earned-income tax-credit parameters.
    pub tax_credit: TaxCreditConfig,
    /// Local surtax rate on the national income tax (fixed at 10% by law).
    pub local_surtax_rate: Decimal,
}

/// Flat withholding rates for business-income (3.3%) earners.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessIncomeRates {
    /// Flat income-tax rate on gross pay (0.03).
    pub income_tax_rate: Decimal,
    /// Flat local income-tax rate on gross pay (0.003).
    pub local_income_tax_rate: Decimal,
}

/// A complete statutory rate table effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// The date these rates take effect.
    pub effective_date: NaiveDate,
    /// Social insurance parameters.
    pub insurance: InsuranceRates,
    /// Income-tax withholding schedule.
    pub income_tax: IncomeTaxTable,
    /// Business-income flat withholding rates.
    pub business_income: BusinessIncomeRates,
}

/// The complete scheme configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SchemeConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Rate tables by effective date (sorted oldest first).
    rate_tables: Vec<RateTable>,
}

impl SchemeConfig {
    /// Creates a new SchemeConfig from its component parts.
    pub fn new(metadata: SchemeMetadata, rate_tables: Vec<RateTable>) -> Self {
        let mut sorted_tables = rate_tables;
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rate_tables: sorted_tables,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rate_tables(&self) -> &[RateTable] {
        &self.rate_tables
    }
}
