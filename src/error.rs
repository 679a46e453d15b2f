//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculator, the advance ledger and the commit path
//! can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Calculation errors are deterministic and returned straight to the caller.
/// Commit errors leave no partial effect behind.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidCalendarInput {
///     message: "month 13 is outside 1-12".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid calendar input: month 13 is outside 1-12");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A month outside 1-12 or an unrecognized weekday name.
    #[error("Invalid calendar input: {message}")]
    InvalidCalendarInput {
        /// A description of the rejected input.
        message: String,
    },

    /// The payroll settings singleton is absent.
    #[error("Payroll settings are missing ({source_path})")]
    MissingSettings {
        /// Where the settings were expected to come from.
        source_path: String,
    },

    /// A salary or deduction figure was supplied as a negative number.
    #[error("Negative value rejected for '{field}': {value}")]
    NegativeInputRejected {
        /// The name of the offending input.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// The ledger changed between the read and the write of a commit.
    #[error(
        "Concurrent commit conflict for employee '{employee_id}': ledger version {expected_version} was read but {actual_version} is current"
    )]
    ConcurrentCommitConflict {
        /// The employee whose ledger moved.
        employee_id: String,
        /// The ledger version observed when the commit started.
        expected_version: u64,
        /// The ledger version found at write time.
        actual_version: u64,
    },

    /// A salary slip already exists and re-commits are configured to be rejected.
    #[error("Salary slip already exists for employee '{employee_id}' for {year}-{month:02}")]
    DuplicateCommit {
        /// The employee of the existing slip.
        employee_id: String,
        /// The month of the existing slip.
        month: u32,
        /// The year of the existing slip.
        year: i32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A prior slip references an advance entry that no longer exists.
    #[error("Advance entry not found: {advance_id}")]
    AdvanceNotFound {
        /// The missing advance id.
        advance_id: String,
    },

    /// An advance entry would leave the `0 <= remaining <= original` range.
    #[error("Advance ledger invariant violated: {message}")]
    LedgerInvariant {
        /// A description of the violation.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Rejects `value` when it is below zero.
    pub(crate) fn reject_negative(field: &str, value: Decimal) -> EngineResult<()> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(EngineError::NegativeInputRejected {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_calendar_input_displays_message() {
        let error = EngineError::InvalidCalendarInput {
            message: "unrecognized weekday 'Thursdy'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid calendar input: unrecognized weekday 'Thursdy'"
        );
    }

    #[test]
    fn test_missing_settings_displays_source() {
        let error = EngineError::MissingSettings {
            source_path: "./config/plant/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll settings are missing (./config/plant/settings.yaml)"
        );
    }

    #[test]
    fn test_negative_input_displays_field_and_value() {
        let error = EngineError::NegativeInputRejected {
            field: "other_deductions".to_string(),
            value: Decimal::from_str("-50.00").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Negative value rejected for 'other_deductions': -50.00"
        );
    }

    #[test]
    fn test_concurrent_commit_conflict_displays_versions() {
        let error = EngineError::ConcurrentCommitConflict {
            employee_id: "emp_001".to_string(),
            expected_version: 3,
            actual_version: 4,
        };
        assert_eq!(
            error.to_string(),
            "Concurrent commit conflict for employee 'emp_001': ledger version 3 was read but 4 is current"
        );
    }

    #[test]
    fn test_duplicate_commit_pads_month() {
        let error = EngineError::DuplicateCommit {
            employee_id: "emp_001".to_string(),
            month: 1,
            year: 2025,
        };
        assert_eq!(
            error.to_string(),
            "Salary slip already exists for employee 'emp_001' for 2025-01"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_advance_not_found_displays_id() {
        let error = EngineError::AdvanceNotFound {
            advance_id: "adv_009".to_string(),
        };
        assert_eq!(error.to_string(), "Advance entry not found: adv_009");
    }

    #[test]
    fn test_reject_negative_allows_zero_and_positive() {
        assert!(EngineError::reject_negative("x", Decimal::ZERO).is_ok());
        assert!(EngineError::reject_negative("x", Decimal::new(1, 2)).is_ok());
        assert!(EngineError::reject_negative("x", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_settings() -> EngineResult<()> {
            Err(EngineError::MissingSettings {
                source_path: "store".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_settings()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
