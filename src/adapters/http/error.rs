//! Shared HTTP error body and status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Error body returned by every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Pairs this body with the status its code maps to.
    pub fn into_response_for(self, code: ErrorCode) -> Response {
        (status_for(code), Json(self)).into_response()
    }
}

/// HTTP status for an error code.
///
/// Rejected input is 422, events that do not fit the session are 409, and
/// failures of the service itself are 5xx.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidChoice
        | ErrorCode::NotAnInteger
        | ErrorCode::NotANumber
        | ErrorCode::BelowMinimum
        | ErrorCode::MissingField => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::UnknownField | ErrorCode::OutOfOrderInput | ErrorCode::SessionComplete => {
            StatusCode::CONFLICT
        }
        ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ScoringUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A submitted value, accepted as a JSON string or number.
///
/// Numbers are turned back into text so that every transport feeds the
/// same raw input into validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl FieldValue {
    pub fn into_raw(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_and_system_errors_get_distinct_statuses() {
        assert_eq!(status_for(ErrorCode::InvalidChoice), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorCode::MissingField), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorCode::OutOfOrderInput), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::SessionNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::ScoringUnavailable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(ErrorCode::StorageError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_serializes_code_string() {
        let body = ErrorResponse::new(ErrorCode::ScoringUnavailable, "down");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "SCORING_UNAVAILABLE");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn field_value_accepts_strings_and_numbers() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"["Yes", 0, 29.85]"#).unwrap();
        let raw: Vec<String> = values.into_iter().map(FieldValue::into_raw).collect();
        assert_eq!(raw, vec!["Yes", "0", "29.85"]);
    }
}
