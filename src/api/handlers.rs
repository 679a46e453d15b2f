//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::PayrollPeriod;

use super::request::{CommitRequest, PreviewRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/preview", post(preview_handler))
        .route("/payroll/commit", post(commit_handler))
        .route(
            "/payroll/slips/:employee_id/:year/:month",
            get(salary_slip_handler),
        )
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a body rejection to a 400 error body.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for POST /payroll/preview.
///
/// Calculates a salary without writing anything.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll preview");

    let request = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    let result = request
        .into_payroll_request()
        .and_then(|request| state.service().preview(&request));

    match result {
        Ok(computation) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %computation.employee_id,
                paid_days = computation.paid_days,
                net_salary = %computation.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll preview completed"
            );
            json_ok(computation)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll preview failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payroll/commit.
///
/// Calculates, applies the advance deduction and stores the salary slip.
async fn commit_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll commit");

    let request = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_rejection_error(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    let result = request
        .into_parts()
        .and_then(|(request, actor)| state.service().commit(&request, &actor));

    match result {
        Ok(slip) => {
            info!(
                correlation_id = %correlation_id,
                slip_id = %slip.id,
                employee_id = %slip.employee_id,
                revision = slip.revision,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll commit completed"
            );
            json_ok(slip)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll commit failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /payroll/slips/:employee_id/:year/:month.
async fn salary_slip_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32, u32)>, PathRejection>,
) -> Response {
    let (employee_id, year, month) = match path {
        Ok(Path(parts)) => parts,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    let result = PayrollPeriod::new(year, month)
        .and_then(|period| state.service().salary_slip(&employee_id, period));

    match result {
        Ok(Some(slip)) => json_ok(slip),
        Ok(None) => {
            ApiErrorResponse::not_found(ApiError::slip_not_found(&employee_id, year, month))
                .into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
