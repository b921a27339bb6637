//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ChurnScorer` - the opaque scoring model
//! - `SessionStore` - keyed storage of in-progress intake sessions

mod churn_scorer;
mod session_store;

pub use churn_scorer::{ChurnScorer, ScorerError};
pub use session_store::{SessionStore, SessionStoreError};
