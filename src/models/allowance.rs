//! Allowance category catalog.
//!
//! This module defines the closed set of allowance categories recognised by
//! the engine together with their statutory non-taxable caps. Categories with
//! a zero cap are fully taxable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed catalog of allowance categories.
///
/// Each category carries a statutory monthly non-taxable cap: the portion of
/// the allowance up to the cap is excluded from the income-tax base, anything
/// above it remains taxable. Custom administrator-defined deductions are a
/// separate open mapping and are not part of this catalog.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AllowanceType;
/// use rust_decimal::Decimal;
///
/// assert_eq!(AllowanceType::Meal.non_taxable_limit(), Decimal::from(200_000));
/// assert_eq!(AllowanceType::Bonus.non_taxable_limit(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceType {
    /// Meal allowance, non-taxable up to 200,000 per month.
    Meal,
    /// Commuting allowance, fully taxable.
    Transportation,
    /// Position allowance, fully taxable.
    Position,
    /// Own-vehicle maintenance allowance, non-taxable up to 200,000 per month.
    VehicleMaintenance,
    /// Family allowance, fully taxable.
    Family,
    /// Childcare allowance, non-taxable up to 200,000 per month.
    Childcare,
    /// Research activity allowance, non-taxable up to 200,000 per month.
    Research,
    /// Night-shift allowance, fully taxable.
    NightShift,
    /// Overtime allowance, fully taxable.
    Overtime,
    /// Annual-leave compensation, fully taxable.
    AnnualLeave,
    /// Bonus, fully taxable.
    Bonus,
}

impl AllowanceType {
    /// Returns every allowance category in catalog order.
    pub fn all() -> &'static [AllowanceType] {
        &[
            AllowanceType::Meal,
            AllowanceType::Transportation,
            AllowanceType::Position,
            AllowanceType::VehicleMaintenance,
            AllowanceType::Family,
            AllowanceType::Childcare,
            AllowanceType::Research,
            AllowanceType::NightShift,
            AllowanceType::Overtime,
            AllowanceType::AnnualLeave,
            AllowanceType::Bonus,
        ]
    }

    /// Returns the stable string key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            AllowanceType::Meal => "meal",
            AllowanceType::Transportation => "transportation",
            AllowanceType::Position => "position",
            AllowanceType::VehicleMaintenance => "vehicle_maintenance",
            AllowanceType::Family => "family",
            AllowanceType::Childcare => "childcare",
            AllowanceType::Research => "research",
            AllowanceType::NightShift => "night_shift",
            AllowanceType::Overtime => "overtime",
            AllowanceType::AnnualLeave => "annual_leave",
            AllowanceType::Bonus => "bonus",
        }
    }

    /// Returns the human-readable label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            AllowanceType::Meal => "Meal allowance",
            AllowanceType::Transportation => "Transportation allowance",
            AllowanceType::Position => "Position allowance",
            AllowanceType::VehicleMaintenance => "Vehicle maintenance allowance",
            AllowanceType::Family => "Family allowance",
            AllowanceType::Childcare => "Childcare allowance",
            AllowanceType::Research => "Research activity allowance",
            AllowanceType::NightShift => "Night-shift allowance",
            AllowanceType::Overtime => "Overtime allowance",
            AllowanceType::AnnualLeave => "Annual-leave compensation",
            AllowanceType::Bonus => "Bonus",
        }
    }

    /// Returns the statutory monthly non-taxable cap for this category.
    ///
    /// Income Tax Act art. 12 exempts meal allowance, own-vehicle maintenance,
    /// childcare and research allowances up to 200,000 per month each; the
    /// remaining categories are fully taxable.
    pub fn non_taxable_limit(&self) -> Decimal {
        match self {
            AllowanceType::Meal
            | AllowanceType::VehicleMaintenance
            | AllowanceType::Childcare
            | AllowanceType::Research => Decimal::from(200_000),
            _ => Decimal::ZERO,
        }
    }
}
