//! Intake-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ConversationKey, ErrorCode};
use crate::domain::intake::ProtocolError;
use crate::ports::SessionStoreError;

/// Errors from intake command and query handlers.
///
/// Rejected values are not errors; they come back as
/// [`IntakeReply::Rejected`](super::IntakeReply::Rejected).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    /// No active session for this conversation.
    #[error("No active intake session for {0}")]
    NotFound(ConversationKey),

    /// The event does not fit the session's cursor.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Session storage failed.
    #[error(transparent)]
    Storage(#[from] SessionStoreError),
}

impl IntakeError {
    pub fn not_found(key: &ConversationKey) -> Self {
        IntakeError::NotFound(key.clone())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::NotFound(_) => ErrorCode::SessionNotFound,
            IntakeError::Protocol(err) => err.code(),
            IntakeError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            IntakeError::NotFound(_) => "No intake in progress".to_string(),
            IntakeError::Protocol(err) => err.to_string(),
            IntakeError::Storage(_) => "Session storage is unavailable".to_string(),
        }
    }
}
