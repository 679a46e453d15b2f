//! Request types for the payroll API.
//!
//! This module defines the JSON bodies of the `/payroll/preview` and
//! `/payroll/commit` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::service::PayrollRequest;

/// Request body for the `/payroll/preview` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The employee to calculate.
    pub employee_id: String,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Manual deductions; zero when omitted.
    #[serde(default)]
    pub other_deductions: Decimal,
}

/// Request body for the `/payroll/commit` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRequest {
    /// The employee to pay.
    pub employee_id: String,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Manual deductions; zero when omitted.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Who is generating the slip.
    pub generated_by: String,
}

impl PreviewRequest {
    /// Converts the body into a service request, validating the month.
    pub fn into_payroll_request(self) -> EngineResult<PayrollRequest> {
        PayrollRequest::new(self.employee_id, self.year, self.month, self.other_deductions)
    }
}

impl CommitRequest {
    /// Splits the body into a service request and the acting user.
    pub fn into_parts(self) -> EngineResult<(PayrollRequest, String)> {
        let request =
            PayrollRequest::new(self.employee_id, self.year, self.month, self.other_deductions)?;
        Ok((request, self.generated_by))
    }
}
