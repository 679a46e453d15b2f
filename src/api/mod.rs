//! HTTP API module for the payroll engine.
//!
//! This module provides REST endpoints to preview and commit salary slips
//! and to read committed slips back.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CommitRequest, PreviewRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
