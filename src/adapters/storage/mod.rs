//! Storage adapters.
//!
//! - **InMemorySessionStore** - per-conversation intake sessions
//! - **IdleSessionSweeper** - background eviction of abandoned sessions

mod idle_session_sweeper;
mod in_memory_session_store;

pub use idle_session_sweeper::{IdleSessionSweeper, IdleSweeperConfig};
pub use in_memory_session_store::InMemorySessionStore;
