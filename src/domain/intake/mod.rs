//! Intake module - guided multi-field data collection.
//!
//! # Components
//!
//! - `schema` - field definitions, legal values, collection order
//! - `validation` - pure check of one raw input against one field
//! - `session` - per-conversation values and cursor
//! - `machine` - the transition function driving a session
//! - `record` - defaulted, ordered record for the scorer
//! - `prompt` - rendering of the next question
//! - `batch` - whole-form submission through the same transitions

mod batch;
mod machine;
mod prompt;
mod record;
mod schema;
mod session;
mod validation;
mod value;

pub use batch::BatchRejection;
pub use machine::{CollectionStateMachine, ProtocolError, Transition};
pub use prompt::{render_prompt, render_status, PromptSpec};
pub use record::{assemble, ScoredRecord};
pub use schema::{churn_schema, FieldDefinition, FieldKind, FieldSchema, LegalValue, SchemaError};
pub use session::{CollectedValue, Cursor, IntakeSession};
pub use validation::{validate, RejectionReason};
pub use value::{RawInput, TypedValue};
