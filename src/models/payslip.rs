//! Payslip record models.
//!
//! This module defines the shape in which callers persist a completed
//! calculation: a [`Payslip`] keyed by employee id and [`PayPeriod`]. The
//! engine itself never reads or writes storage; these types only fix the
//! record layout shared with batch payroll generation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::PayrollResult;

/// A pay period identified as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
///
/// let period: PayPeriod = "2025-03".parse().unwrap();
/// assert_eq!(period.year, 2025);
/// assert_eq!(period.month, 3);
/// assert_eq!(period.to_string(), "2025-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidInput {
            field: "pay_period".to_string(),
            message: format!("'{}' is not a YYYY-MM period", s),
        };

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl Serialize for PayPeriod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PayPeriod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Payment status of a payslip record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Calculated but not yet paid out.
    Pending,
    /// Paid out on `paid_date`.
    Paid,
}

/// A persisted payslip record: one employee, one pay period, one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee this payslip belongs to.
    pub employee_id: String,
    /// The pay period the payslip covers.
    pub pay_period: PayPeriod,
    /// Whether the payslip has been paid out.
    pub status: PaymentStatus,
    /// The date the payment was made, if any.
    pub paid_date: Option<NaiveDate>,
    /// The complete calculation breakdown.
    pub result: PayrollResult,
}

impl Payslip {
    /// Wraps a calculation result as a pending payslip.
    pub fn pending(
        employee_id: impl Into<String>,
        pay_period: PayPeriod,
        result: PayrollResult,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            pay_period,
            status: PaymentStatus::Pending,
            paid_date: None,
            result,
        }
    }
}
