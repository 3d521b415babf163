//! Configuration loading and management for the Payroll Calculation Engine.
//!
//! This module provides functionality to load statutory rate tables from YAML
//! files, including scheme metadata, insurance rates, and the income-tax
//! withholding schedule.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr2025").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BusinessIncomeRates, EarnedIncomeDeductionBand, EmploymentRates, HealthRates, IncomeTaxTable,
    InsuranceRates, PensionRates, RateTable, SchemeConfig, SchemeMetadata, TaxBracket,
    TaxCreditCap, TaxCreditConfig,
};
