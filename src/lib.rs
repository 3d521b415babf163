//! Payroll Calculation Engine for Korean statutory withholding
//!
//! This crate computes monthly payroll breakdowns for employees and freelancers
//! under the Korean statutory deduction scheme (national pension, health and
//! long-term care insurance, employment insurance, income tax and the local
//! surtax), and solves the inverse problem of finding the base salary that
//! produces a target net amount.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
