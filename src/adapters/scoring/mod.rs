//! Scoring Adapters
//!
//! Implementations of the ChurnScorer port.
//!
//! - **HttpChurnScorer** - remote model-serving endpoint
//! - **MockChurnScorer** - fixed probability or failure (development/testing)

mod http_scorer;
mod mock_scorer;

pub use http_scorer::HttpChurnScorer;
pub use mock_scorer::MockChurnScorer;
