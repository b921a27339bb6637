//! Adapters - Implementations of port interfaces and transports.
//!
//! Adapters connect the domain to external systems:
//! - `scoring` - churn scorer implementations (HTTP model endpoint, mock)
//! - `storage` - session store and idle-session sweeper
//! - `http` - JSON API and web form (axum)
//! - `telegram` - chat bot (teloxide)

pub mod http;
pub mod scoring;
pub mod storage;
pub mod telegram;

pub use scoring::{HttpChurnScorer, MockChurnScorer};
pub use storage::{IdleSessionSweeper, IdleSweeperConfig, InMemorySessionStore};
