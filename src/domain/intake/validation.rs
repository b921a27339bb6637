//! Validation engine - checks one raw input against one field definition.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

use super::schema::{FieldDefinition, FieldKind, LegalValue};
use super::value::{RawInput, TypedValue};

/// Why a candidate value was refused.
///
/// Every variant is recoverable: the user is asked for the same field again.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("'{value}' is not one of the allowed options")]
    InvalidChoice { value: String },

    #[error("'{value}' is not a whole number")]
    NotAnInteger { value: String },

    #[error("'{value}' is not a number")]
    NotANumber { value: String },

    #[error("{value} is below the minimum of {minimum}")]
    BelowMinimum { value: String, minimum: String },
}

impl RejectionReason {
    pub fn code(&self) -> ErrorCode {
        match self {
            RejectionReason::InvalidChoice { .. } => ErrorCode::InvalidChoice,
            RejectionReason::NotAnInteger { .. } => ErrorCode::NotAnInteger,
            RejectionReason::NotANumber { .. } => ErrorCode::NotANumber,
            RejectionReason::BelowMinimum { .. } => ErrorCode::BelowMinimum,
        }
    }
}

/// Validates `raw` against `field`, producing the typed value to store.
///
/// Choice membership is exact for text members; integer members are matched
/// after parsing. Scalars are trimmed before parsing.
pub fn validate(field: &FieldDefinition, raw: &RawInput) -> Result<TypedValue, RejectionReason> {
    let input = raw.as_str();

    match &field.kind {
        FieldKind::Choice { legal_values } => legal_values
            .iter()
            .find(|legal| matches_legal(legal, input))
            .map(LegalValue::to_typed)
            .ok_or_else(|| RejectionReason::InvalidChoice {
                value: input.to_string(),
            }),

        FieldKind::IntegerScalar { min_value } => {
            let value: i64 = input
                .trim()
                .parse()
                .map_err(|_| RejectionReason::NotAnInteger {
                    value: input.to_string(),
                })?;
            match min_value {
                Some(min) if value < *min => Err(RejectionReason::BelowMinimum {
                    value: value.to_string(),
                    minimum: min.to_string(),
                }),
                _ => Ok(TypedValue::Integer(value)),
            }
        }

        FieldKind::FloatScalar { min_value } => {
            let value = input
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RejectionReason::NotANumber {
                    value: input.to_string(),
                })?;
            match min_value {
                Some(min) if value < *min => Err(RejectionReason::BelowMinimum {
                    value: value.to_string(),
                    minimum: min.to_string(),
                }),
                _ => Ok(TypedValue::Float(value)),
            }
        }
    }
}

fn matches_legal(legal: &LegalValue, input: &str) -> bool {
    match legal {
        LegalValue::Text(s) => s == input,
        LegalValue::Integer(i) => input.trim().parse::<i64>().is_ok_and(|v| v == *i),
    }
}
