//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowance;
mod payroll_result;
mod payslip;
mod salary_input;

pub use allowance::AllowanceType;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, Deductions, PayrollResult, ReverseResult,
};
pub use payslip::{PayPeriod, PaymentStatus, Payslip};
pub use salary_input::{ReverseInput, SalaryInput, TaxType, max_supported_amount};
