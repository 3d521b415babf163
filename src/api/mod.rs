//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for forward and reverse
//! payroll calculations under the Korean statutory deduction scheme.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ReverseRequest, SalaryBasis};
pub use response::{ApiError, CalculationResponse, ReverseResponse};
pub use state::AppState;
