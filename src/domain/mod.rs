//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, probability, error codes)
//! - `intake` - Field schema, validation, and the collection state machine
//! - `scoring` - Verdict derivation from a churn probability

pub mod foundation;
pub mod intake;
pub mod scoring;
