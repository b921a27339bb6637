//! Verdict - the user-facing outcome derived from a churn probability.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Probability;

/// Probability at or above which a customer is predicted to leave.
pub const LEAVES_THRESHOLD: f64 = 50.0;

/// Binary churn outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChurnLabel {
    Stays,
    Leaves,
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChurnLabel::Stays => write!(f, "STAYS"),
            ChurnLabel::Leaves => write!(f, "LEAVES"),
        }
    }
}

/// Label plus the confidence in that label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: ChurnLabel,
    /// Confidence in `label`: `p` for LEAVES, `100 - p` for STAYS.
    pub confidence: Probability,
    /// Raw churn probability returned by the scorer.
    pub churn_probability: Probability,
}

impl Verdict {
    pub fn from_probability(p: Probability) -> Self {
        if p.value() >= LEAVES_THRESHOLD {
            Self {
                label: ChurnLabel::Leaves,
                confidence: p,
                churn_probability: p,
            }
        } else {
            Self {
                label: ChurnLabel::Stays,
                confidence: p.complement(),
                churn_probability: p,
            }
        }
    }

    /// Text shown to the user, e.g. `Prediction: LEAVES (73.5% confidence)`.
    pub fn summary(&self) -> String {
        format!("Prediction: {} ({} confidence)", self.label, self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(p: f64) -> Verdict {
        Verdict::from_probability(Probability::try_new(p).unwrap())
    }

    #[test]
    fn high_probability_leaves_with_same_confidence() {
        let v = verdict(73.5);
        assert_eq!(v.label, ChurnLabel::Leaves);
        assert!((v.confidence.value() - 73.5).abs() < 1e-9);
    }

    #[test]
    fn low_probability_stays_with_complement_confidence() {
        let v = verdict(20.0);
        assert_eq!(v.label, ChurnLabel::Stays);
        assert!((v.confidence.value() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_inclusive_for_leaves() {
        assert_eq!(verdict(50.0).label, ChurnLabel::Leaves);
        assert_eq!(verdict(49.999).label, ChurnLabel::Stays);
    }

    #[test]
    fn extremes_map_to_full_confidence() {
        assert!((verdict(0.0).confidence.value() - 100.0).abs() < f64::EPSILON);
        assert!((verdict(100.0).confidence.value() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_mentions_label_and_confidence() {
        assert_eq!(verdict(12.0).summary(), "Prediction: STAYS (88.0% confidence)");
    }

    #[test]
    fn label_serializes_screaming() {
        assert_eq!(serde_json::to_string(&ChurnLabel::Leaves).unwrap(), "\"LEAVES\"");
    }
}
