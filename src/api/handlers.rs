//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_payroll, reverse_calculate_payroll};

use super::request::{CalculationRequest, ReverseRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, ReverseResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/reverse-calculate", post(reverse_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error body.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a salary input and returns the full payroll breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let effective_date = request
        .effective_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let start_time = Instant::now();
    let outcome = state
        .config()
        .rates_for(effective_date)
        .and_then(|rates| calculate_payroll(&request.into_salary_input()?, rates));

    match outcome {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                effective_date = %effective_date,
                gross_salary = %result.gross_salary,
                net_salary = %result.net_salary,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(envelope(effective_date, result)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for POST /reverse-calculate endpoint.
///
/// Accepts a target net amount and solves for the base salary producing it.
async fn reverse_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReverseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reverse calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let effective_date = request
        .effective_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let start_time = Instant::now();
    let outcome = state.config().rates_for(effective_date).and_then(|rates| {
        reverse_calculate_payroll(request.target_net, &request.reverse_input(), rates)
    });

    match outcome {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                effective_date = %effective_date,
                base_salary = %result.base_salary,
                iterations = result.iterations,
                converged = result.converged,
                duration_us = duration.as_micros(),
                "Reverse calculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ReverseResponse {
                    calculation_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    effective_date,
                    result,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reverse calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

fn envelope(
    effective_date: NaiveDate,
    result: crate::models::PayrollResult,
) -> CalculationResponse {
    CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        effective_date,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/kr2025").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_request(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let body = r#"{
            "base_salary": "3000000",
            "allowances": { "meal": "200000" },
            "tax_type": "employee_income",
            "dependents_count": 1,
            "effective_date": "2025-08-01"
        }"#;

        let response = router
            .oneshot(post_request("/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(envelope.result.gross_salary, dec("3200000"));
        assert_eq!(envelope.result.net_salary, dec("2771074"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_request("/calculate", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_tax_type_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{
            "base_salary": "3000000",
            "dependents_count": 1
        }"#;

        let response = router
            .oneshot(post_request("/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert!(
            error.message.contains("missing field")
                || error.message.to_lowercase().contains("tax_type"),
            "Expected error message to mention the missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_negative_base_salary_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{
            "base_salary": "-1000",
            "tax_type": "employee_income",
            "dependents_count": 1
        }"#;

        let response = router
            .oneshot(post_request("/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_effective_date_before_all_tables_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{
            "base_salary": "3000000",
            "tax_type": "employee_income",
            "dependents_count": 1,
            "effective_date": "2019-06-15"
        }"#;

        let response = router
            .oneshot(post_request("/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "RATES_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reverse_endpoint_round_trips() {
        let router = create_router(create_test_state());

        let body = r#"{
            "target_net": "2771074",
            "tax_type": "employee_income",
            "dependents_count": 1,
            "effective_date": "2025-08-01"
        }"#;

        let response = router
            .oneshot(post_request("/reverse-calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: ReverseResponse = serde_json::from_slice(&body).unwrap();

        assert!(envelope.result.converged);
        assert!(envelope.result.calculated_net >= dec("2771074"));
        assert!(envelope.result.difference <= dec("1"));
    }

    #[tokio::test]
    async fn test_reverse_zero_target_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{
            "target_net": "0",
            "tax_type": "employee_income",
            "dependents_count": 1
        }"#;

        let response = router
            .oneshot(post_request("/reverse-calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("target_net"));
    }

    #[tokio::test]
    async fn test_annual_basis_converts_before_calculation() {
        let router = create_router(create_test_state());

        let body = r#"{
            "base_salary": "36000000",
            "salary_basis": "annual",
            "tax_type": "employee_income",
            "dependents_count": 1,
            "effective_date": "2025-08-01"
        }"#;

        let response = router
            .oneshot(post_request("/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope.result.base_salary, dec("3000000"));
    }

    #[tokio::test]
    async fn test_effective_date_selects_rate_table() {
        let router = create_router(create_test_state());

        let body_for = |date: &str| {
            format!(
                r#"{{
                    "base_salary": "10000000",
                    "tax_type": "employee_income",
                    "dependents_count": 1,
                    "effective_date": "{}"
                }}"#,
                date
            )
        };

        // H1 table: pension ceiling 6,170,000 -> 277,650.
        let response = create_router(create_test_state())
            .oneshot(post_request("/calculate", body_for("2025-03-01")))
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let h1: CalculationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(h1.result.deductions.national_pension, dec("277650"));

        // H2 table: pension ceiling 6,370,000 -> 286,650.
        let response = router
            .oneshot(post_request("/calculate", body_for("2025-08-01")))
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let h2: CalculationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(h2.result.deductions.national_pension, dec("286650"));
    }

    #[tokio::test]
    async fn test_business_income_calculation() {
        let router = create_router(create_test_state());

        let body = r#"{
            "base_salary": "1000000",
            "tax_type": "business_income_3_3",
            "dependents_count": 1,
            "effective_date": "2025-08-01"
        }"#;

        let response = router
            .oneshot(post_request("/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope.result.net_salary, dec("967000"));
        assert_eq!(
            envelope.result.deductions.national_pension,
            Decimal::ZERO
        );
    }
}
