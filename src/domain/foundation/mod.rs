//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the churn intake domain.

mod errors;
mod ids;
mod probability;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{ConversationKey, SessionId};
pub use probability::Probability;
pub use timestamp::Timestamp;
