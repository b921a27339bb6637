//! Scoring service - bounded call to the churn scorer.

mod scoring_service;

pub use scoring_service::{ScoringError, ScoringService};
