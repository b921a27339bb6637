//! Scoring module - churn probability and the verdict derived from it.

mod verdict;

pub use verdict::{ChurnLabel, Verdict, LEAVES_THRESHOLD};
