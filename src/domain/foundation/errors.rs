//! Error types for the domain layer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
///
/// Input problems the user can fix and failures of the system itself
/// live in disjoint groups; a code from one group is never reused for
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum ErrorCode {
    // Input rejected, user may retry
    InvalidChoice,
    NotAnInteger,
    NotANumber,
    BelowMinimum,
    MissingField,
    UnknownField,

    // Protocol errors
    OutOfOrderInput,
    SessionComplete,

    // Not found errors
    SessionNotFound,

    // System failures
    ScoringUnavailable,
    StorageError,
    InternalError,
}

impl ErrorCode {
    /// Returns true when the user can correct the input and try again.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidChoice
                | ErrorCode::NotAnInteger
                | ErrorCode::NotANumber
                | ErrorCode::BelowMinimum
                | ErrorCode::MissingField
                | ErrorCode::UnknownField
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidChoice => "INVALID_CHOICE",
            ErrorCode::NotAnInteger => "NOT_AN_INTEGER",
            ErrorCode::NotANumber => "NOT_A_NUMBER",
            ErrorCode::BelowMinimum => "BELOW_MINIMUM",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::UnknownField => "UNKNOWN_FIELD",
            ErrorCode::OutOfOrderInput => "OUT_OF_ORDER_INPUT",
            ErrorCode::SessionComplete => "SESSION_COMPLETE",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::ScoringUnavailable => "SCORING_UNAVAILABLE",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("probability", 0.0, 100.0, 150.5);
        assert_eq!(
            format!("{}", err),
            "Field 'probability' must be between 0 and 100, got 150.5"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidChoice), "INVALID_CHOICE");
        assert_eq!(format!("{}", ErrorCode::ScoringUnavailable), "SCORING_UNAVAILABLE");
    }

    #[test]
    fn error_code_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::BelowMinimum).unwrap();
        assert_eq!(json, "\"BELOW_MINIMUM\"");
    }

    #[test]
    fn input_and_system_codes_never_overlap() {
        assert!(ErrorCode::InvalidChoice.is_user_correctable());
        assert!(ErrorCode::BelowMinimum.is_user_correctable());
        assert!(!ErrorCode::ScoringUnavailable.is_user_correctable());
        assert!(!ErrorCode::OutOfOrderInput.is_user_correctable());
        assert!(!ErrorCode::StorageError.is_user_correctable());
    }
}
