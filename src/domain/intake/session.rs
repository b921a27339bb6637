//! Per-conversation intake state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::schema::FieldSchema;
use super::value::TypedValue;

/// The field the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "order", rename_all = "snake_case")]
pub enum Cursor {
    /// Waiting for the field with this order.
    At(usize),
    /// Every field has a value.
    Complete,
}

impl Cursor {
    fn first(schema: &FieldSchema) -> Self {
        schema.first_order().map_or(Cursor::Complete, Cursor::At)
    }
}

/// One accepted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedValue {
    pub field: String,
    pub value: TypedValue,
}

/// Mutable state of one intake conversation.
///
/// Only [`CollectionStateMachine`](super::CollectionStateMachine) mutates a
/// session; adapters hold it and hand it back on every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeSession {
    id: SessionId,
    values: Vec<CollectedValue>,
    cursor: Cursor,
    started_at: Timestamp,
    updated_at: Timestamp,
}

impl IntakeSession {
    pub(super) fn new(schema: &FieldSchema) -> Self {
        Self::with_id(SessionId::new(), schema)
    }

    pub(super) fn with_id(id: SessionId, schema: &FieldSchema) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            values: Vec::new(),
            cursor: Cursor::first(schema),
            started_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == Cursor::Complete
    }

    /// Accepted answers in collection order.
    pub fn values(&self) -> &[CollectedValue] {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&TypedValue> {
        self.values
            .iter()
            .find(|v| v.field == field)
            .map(|v| &v.value)
    }

    pub fn filled_count(&self) -> usize {
        self.values.len()
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// True when nothing has touched the session since `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        self.updated_at.is_before(cutoff)
    }

    pub(super) fn record(&mut self, field: &str, value: TypedValue, next: Cursor) {
        self.values.push(CollectedValue {
            field: field.to_string(),
            value,
        });
        self.cursor = next;
        self.updated_at = Timestamp::now();
    }

    pub(super) fn reset(&mut self, schema: &FieldSchema) {
        let now = Timestamp::now();
        self.values.clear();
        self.cursor = Cursor::first(schema);
        self.started_at = now;
        self.updated_at = now;
    }
}
