//! Data transfer objects for the JSON prediction endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adapters::http::error::FieldValue;
use crate::adapters::http::intake::VerdictResponse;
use crate::domain::intake::ScoredRecord;

/// Body of `POST /api/v1/predictions`: every field by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct PredictionRequest {
    pub fields: HashMap<String, FieldValue>,
}

impl PredictionRequest {
    pub fn into_raw(self) -> HashMap<String, String> {
        self.fields
            .into_iter()
            .map(|(name, value)| (name, value.into_raw()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub verdict: VerdictResponse,
    /// The record as sent to the scorer.
    pub record: ScoredRecord,
}
