//! Reverse payroll calculation.
//!
//! Solves for the base salary that produces a target net amount by bisecting
//! over whole-won candidates. The net-of-base function is treated as
//! monotonically non-decreasing, which holds for the statutory deduction
//! scheme: every deduction grows no faster than the base itself.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, ReverseInput, ReverseResult, max_supported_amount};

use super::payroll::calculate_payroll;

/// Warning code recorded when the solver hits the iteration cap.
pub const WARN_REVERSE_NOT_CONVERGED: &str = "REVERSE_NOT_CONVERGED";

const MAX_ITERATIONS: u32 = 100;

/// Finds the smallest whole-won base salary whose net pay meets or exceeds
/// `target_net`.
///
/// The search brackets the answer by doubling an upper bound until its net
/// meets the target, then bisects on whole won until the bracket collapses to
/// one won. The upper end of the bracket is returned, so the resulting net is
/// never below the target; rounding inside the deduction rules means it can
/// exceed the target by a few won.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `target_net` is zero, negative,
/// fractional, or above the supported maximum, or when the carried input
/// fields fail validation.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::reverse_calculate_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{ReverseInput, TaxType};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let config = ConfigLoader::load("./config/kr2025").unwrap();
/// let input = ReverseInput {
///     allowances: BTreeMap::new(),
///     tax_type: TaxType::EmployeeIncome,
///     dependents_count: 1,
///     custom_deductions: BTreeMap::new(),
///     meal_excess_deduction: None,
/// };
/// let target = Decimal::from(2_771_074);
/// let reverse = reverse_calculate_payroll(target, &input, config.latest()).unwrap();
/// assert!(reverse.calculated_net >= target);
/// ```
pub fn reverse_calculate_payroll(
    target_net: Decimal,
    input: &ReverseInput,
    rates: &RateTable,
) -> EngineResult<ReverseResult> {
    if target_net <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "target_net".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if target_net != target_net.trunc() {
        return Err(EngineError::InvalidInput {
            field: "target_net".to_string(),
            message: "must be a whole currency amount".to_string(),
        });
    }
    if target_net > max_supported_amount() {
        return Err(EngineError::InvalidInput {
            field: "target_net".to_string(),
            message: "exceeds the supported maximum amount".to_string(),
        });
    }

    let net_at = |base: Decimal| -> EngineResult<Decimal> {
        Ok(calculate_payroll(&input.with_base(base), rates)?.net_salary)
    };

    // Allowances alone may already satisfy the target.
    if net_at(Decimal::ZERO)? >= target_net {
        return finish(Decimal::ZERO, target_net, input, rates, 0, true);
    }

    // Candidate bases never exceed the validated amount range, so every
    // forward evaluation inside the search is panic-free.
    let cap = max_supported_amount();
    let mut iterations: u32 = 0;
    let mut low = Decimal::ZERO;
    let mut high = target_net.max(Decimal::ONE);
    while net_at(high)? < target_net {
        iterations += 1;
        if iterations >= MAX_ITERATIONS || high >= cap {
            return finish(high, target_net, input, rates, iterations, false);
        }
        low = high;
        high = (high * Decimal::from(2)).min(cap);
    }

    // Invariant: net(low) < target <= net(high).
    while high - low > Decimal::ONE {
        iterations += 1;
        if iterations >= MAX_ITERATIONS {
            return finish(high, target_net, input, rates, iterations, false);
        }
        let mid = ((low + high) / Decimal::from(2)).floor();
        if net_at(mid)? >= target_net {
            high = mid;
        } else {
            low = mid;
        }
    }

    finish(high, target_net, input, rates, iterations, true)
}

fn finish(
    base_salary: Decimal,
    target_net: Decimal,
    input: &ReverseInput,
    rates: &RateTable,
    iterations: u32,
    converged: bool,
) -> EngineResult<ReverseResult> {
    let mut result = calculate_payroll(&input.with_base(base_salary), rates)?;

    if !converged {
        result.audit_trace.warnings.push(AuditWarning {
            code: WARN_REVERSE_NOT_CONVERGED.to_string(),
            message: format!(
                "Reverse search stopped after {} iterations; best candidate base is {}",
                iterations, base_salary
            ),
            severity: "medium".to_string(),
        });
    }

    let calculated_net = result.net_salary;
    Ok(ReverseResult {
        base_salary,
        calculated_net,
        difference: calculated_net - target_net,
        converged,
        iterations,
        result,
    })
}
