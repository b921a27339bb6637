//! Data transfer objects for the intake endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::error::FieldValue;
use crate::domain::foundation::SessionId;
use crate::domain::intake::{CollectedValue, IntakeSession, PromptSpec, RejectionReason};
use crate::domain::scoring::{ChurnLabel, Verdict};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/v1/intake/:id/answers`.
///
/// Without `field` the value goes to whatever field the session awaits.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub field: Option<String>,
    pub value: FieldValue,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOutcome {
    Prompt,
    Rejected,
    Completed,
    Cancelled,
}

/// Answers so far plus what comes next.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub filled: usize,
    pub total: usize,
    pub answers: Vec<CollectedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptSpec>,
}

impl ProgressResponse {
    pub fn new(session: &IntakeSession, prompt: Option<PromptSpec>, total: usize) -> Self {
        Self {
            filled: session.filled_count(),
            total,
            answers: session.values().to_vec(),
            prompt,
        }
    }
}

/// Body of `GET /api/v1/intake/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeStateResponse {
    pub session_id: String,
    pub complete: bool,
    #[serde(flatten)]
    pub progress: ProgressResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectionResponse {
    pub code: String,
    pub message: String,
}

impl From<&RejectionReason> for RejectionResponse {
    fn from(reason: &RejectionReason) -> Self {
        Self {
            code: reason.code().to_string(),
            message: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictResponse {
    pub label: ChurnLabel,
    pub confidence: f64,
    pub churn_probability: f64,
    pub summary: String,
}

impl From<&Verdict> for VerdictResponse {
    fn from(verdict: &Verdict) -> Self {
        Self {
            label: verdict.label,
            confidence: verdict.confidence.value(),
            churn_probability: verdict.churn_probability.value(),
            summary: verdict.summary(),
        }
    }
}

/// Body returned by every intake command.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReplyResponse {
    pub outcome: IntakeOutcome,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<VerdictResponse>,
}

impl IntakeReplyResponse {
    pub fn progress(outcome: IntakeOutcome, session_id: SessionId, progress: ProgressResponse) -> Self {
        Self {
            outcome,
            session_id: session_id.to_string(),
            progress: Some(progress),
            rejection: None,
            verdict: None,
        }
    }

    pub fn rejected(session_id: SessionId, progress: ProgressResponse, reason: &RejectionReason) -> Self {
        Self {
            rejection: Some(reason.into()),
            ..Self::progress(IntakeOutcome::Rejected, session_id, progress)
        }
    }

    pub fn completed(session_id: SessionId, verdict: &Verdict) -> Self {
        Self {
            outcome: IntakeOutcome::Completed,
            session_id: session_id.to_string(),
            progress: None,
            rejection: None,
            verdict: Some(verdict.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Probability;

    #[test]
    fn answer_request_field_is_optional() {
        let req: AnswerRequest = serde_json::from_str(r#"{"value": 12}"#).unwrap();
        assert!(req.field.is_none());
        assert_eq!(req.value.into_raw(), "12");

        let req: AnswerRequest =
            serde_json::from_str(r#"{"field": "Contract", "value": "One year"}"#).unwrap();
        assert_eq!(req.field.as_deref(), Some("Contract"));
    }

    #[test]
    fn completed_reply_serializes_verdict() {
        let verdict = Verdict::from_probability(Probability::try_new(80.0).unwrap());
        let body = IntakeReplyResponse::completed(SessionId::new(), &verdict);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["outcome"], "completed");
        assert_eq!(json["verdict"]["label"], "LEAVES");
        assert_eq!(json["verdict"]["summary"], "Prediction: LEAVES (80.0% confidence)");
        assert!(json.get("progress").is_none());
    }
}
