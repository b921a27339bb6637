//! Collection state machine - one data-driven transition function for all fields.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};

use super::prompt::PromptSpec;
use super::record::{assemble, ScoredRecord};
use super::schema::{FieldDefinition, FieldSchema};
use super::session::{Cursor, IntakeSession};
use super::validation::{validate, RejectionReason};
use super::value::RawInput;

/// Input that does not belong to the field the session is waiting for.
///
/// Raised before validation; the session is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Input for '{received}' arrived while waiting for '{expected}'")]
    OutOfOrder { expected: String, received: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("All fields are already collected")]
    AlreadyComplete,
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtocolError::OutOfOrder { .. } => ErrorCode::OutOfOrderInput,
            ProtocolError::UnknownField(_) => ErrorCode::UnknownField,
            ProtocolError::AlreadyComplete => ErrorCode::SessionComplete,
        }
    }
}

/// Outcome of one event applied to a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// Value stored; ask for the next field.
    Advanced { prompt: PromptSpec },
    /// Value refused; ask for the same field again.
    Rejected {
        reason: RejectionReason,
        prompt: PromptSpec,
    },
    /// Last field stored; the session is ready for assembly.
    Completed,
    /// Session reset by the user.
    Cancelled,
}

/// Drives [`IntakeSession`] through the fields of a [`FieldSchema`].
#[derive(Debug, Clone)]
pub struct CollectionStateMachine {
    schema: Arc<FieldSchema>,
}

impl CollectionStateMachine {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Creates a fresh session waiting for the first field.
    pub fn start(&self) -> IntakeSession {
        IntakeSession::new(&self.schema)
    }

    /// Like [`start`](Self::start), under an id chosen by the caller.
    pub fn start_with_id(&self, id: SessionId) -> IntakeSession {
        IntakeSession::with_id(id, &self.schema)
    }

    /// Discards all answers and rewinds to the first field.
    ///
    /// Returns the first prompt, or `None` when the schema is empty.
    pub fn restart(&self, session: &mut IntakeSession) -> Option<PromptSpec> {
        session.reset(&self.schema);
        self.prompt(session)
    }

    /// Prompt for the field under the cursor.
    pub fn prompt(&self, session: &IntakeSession) -> Option<PromptSpec> {
        self.current_field(session)
            .map(|field| PromptSpec::for_field(field, self.schema.len()))
    }

    pub fn current_field(&self, session: &IntakeSession) -> Option<&FieldDefinition> {
        match session.cursor() {
            Cursor::At(order) => self.schema.by_order(order),
            Cursor::Complete => None,
        }
    }

    /// Applies `raw` as the answer for `field`.
    ///
    /// Fails with [`ProtocolError`] if `field` is not the awaited one. A
    /// rejected value leaves the session exactly as it was.
    pub fn advance(
        &self,
        session: &mut IntakeSession,
        field: &FieldDefinition,
        raw: &RawInput,
    ) -> Result<Transition, ProtocolError> {
        if self.schema.by_order(field.order) != Some(field) {
            return Err(ProtocolError::UnknownField(field.name.clone()));
        }

        let awaited = match session.cursor() {
            Cursor::Complete => return Err(ProtocolError::AlreadyComplete),
            Cursor::At(order) => order,
        };
        if awaited != field.order {
            let expected = self
                .schema
                .by_order(awaited)
                .map(|f| f.name.clone())
                .unwrap_or_default();
            return Err(ProtocolError::OutOfOrder {
                expected,
                received: field.name.clone(),
            });
        }

        let value = match validate(field, raw) {
            Ok(value) => value,
            Err(reason) => {
                return Ok(Transition::Rejected {
                    reason,
                    prompt: PromptSpec::for_field(field, self.schema.len()),
                });
            }
        };

        let next = self
            .schema
            .next_order(field.order)
            .map_or(Cursor::Complete, Cursor::At);
        session.record(&field.name, value, next);

        Ok(match self.prompt(session) {
            Some(prompt) => Transition::Advanced { prompt },
            None => Transition::Completed,
        })
    }

    /// Applies `raw` to the field named `name`.
    pub fn advance_named(
        &self,
        session: &mut IntakeSession,
        name: &str,
        raw: &RawInput,
    ) -> Result<Transition, ProtocolError> {
        let field = self
            .schema
            .by_name(name)
            .ok_or_else(|| ProtocolError::UnknownField(name.to_string()))?;
        self.advance(session, field, raw)
    }

    /// Applies `raw` to the field with position `order`.
    pub fn advance_at(
        &self,
        session: &mut IntakeSession,
        order: usize,
        raw: &RawInput,
    ) -> Result<Transition, ProtocolError> {
        let field = self
            .schema
            .by_order(order)
            .ok_or_else(|| ProtocolError::UnknownField(format!("#{}", order)))?;
        self.advance(session, field, raw)
    }

    /// Applies `raw` to whichever field the cursor points at.
    pub fn advance_current(
        &self,
        session: &mut IntakeSession,
        raw: &RawInput,
    ) -> Result<Transition, ProtocolError> {
        let field = self
            .current_field(session)
            .ok_or(ProtocolError::AlreadyComplete)?;
        self.advance(session, field, raw)
    }

    /// Resets the session regardless of the cursor position.
    pub fn cancel(&self, session: &mut IntakeSession) -> Transition {
        session.reset(&self.schema);
        Transition::Cancelled
    }

    /// Builds the scorer record, defaulting any unfilled field.
    pub fn assemble(&self, session: &IntakeSession) -> ScoredRecord {
        assemble(&self.schema, session)
    }
}
