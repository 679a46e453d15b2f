//! Response types for the payroll API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a slip not found error response.
    pub fn slip_not_found(employee_id: &str, year: i32, month: u32) -> Self {
        Self::new(
            "SLIP_NOT_FOUND",
            format!(
                "No salary slip for employee '{}' for {}-{:02}",
                employee_id, year, month
            ),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// Creates a 404 response.
    pub fn not_found(error: ApiError) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::InvalidCalendarInput { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_CALENDAR_INPUT", message),
            ),
            EngineError::NegativeInputRejected { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "NEGATIVE_INPUT_REJECTED",
                    message,
                    format!("'{}' must be zero or greater", field),
                ),
            ),
            EngineError::ConcurrentCommitConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CONCURRENT_COMMIT_CONFLICT",
                    message,
                    "Another commit changed the advance ledger; retry the request",
                ),
            ),
            EngineError::DuplicateCommit { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_COMMIT", message),
            ),
            EngineError::MissingSettings { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("MISSING_SETTINGS", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::AdvanceNotFound { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("ADVANCE_NOT_FOUND", message),
            ),
            EngineError::LedgerInvariant { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("LEDGER_INVARIANT", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
