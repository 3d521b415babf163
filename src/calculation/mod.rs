//! Payroll calculation rules.
//!
//! Each statutory rule lives in its own module and returns a result struct
//! carrying both the computed amount and the audit step that explains it.
//! [`calculate_payroll`] orchestrates the rules into a full monthly
//! breakdown; [`reverse_calculate_payroll`] inverts it to solve net-to-gross.

mod conversion;
mod employment_insurance;
mod health_insurance;
mod income_tax;
mod national_pension;
mod payroll;
mod reverse;
mod rounding;
mod taxable_base;

pub use conversion::{
    annual_to_monthly, daily_to_monthly, hourly_to_monthly, standard_monthly_hours,
    working_days_per_month,
};
pub use employment_insurance::{EmploymentInsuranceResult, calculate_employment_insurance};
pub use health_insurance::{HealthInsuranceResult, calculate_health_insurance};
pub use income_tax::{
    IncomeTaxResult, calculate_withholding, earned_income_deduction, earned_income_tax_credit,
    progressive_tax,
};
pub use national_pension::{NationalPensionResult, calculate_national_pension};
pub use payroll::{WARN_NEGATIVE_NET_CLAMPED, calculate_payroll};
pub use reverse::{WARN_REVERSE_NOT_CONVERGED, reverse_calculate_payroll};
pub use rounding::round_won;
pub use taxable_base::{TaxableBaseResult, compute_taxable_base};
