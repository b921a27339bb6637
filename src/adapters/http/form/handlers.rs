//! HTTP handlers for the web form and its JSON twin.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::application::handlers::prediction::{
    PredictionError, SubmitFormCommand, SubmitFormHandler,
};
use crate::domain::intake::FieldSchema;

use super::dto::{PredictionRequest, PredictionResponse};
use super::page::{render_page, PageOutcome};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FormHandlers {
    submit_handler: Arc<SubmitFormHandler>,
    schema: Arc<FieldSchema>,
}

impl FormHandlers {
    pub fn new(submit_handler: Arc<SubmitFormHandler>, schema: Arc<FieldSchema>) -> Self {
        Self {
            submit_handler,
            schema,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Empty form
pub async fn show_form(State(handlers): State<FormHandlers>) -> Html<String> {
    Html(render_page(&handlers.schema, &HashMap::new(), None))
}

/// POST /predict - Score a submitted form and re-render the page
pub async fn submit_form(
    State(handlers): State<FormHandlers>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let cmd = SubmitFormCommand {
        fields: fields.clone(),
    };

    let (status, outcome) = match handlers.submit_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, PageOutcome::Verdict(result.verdict)),
        Err(e) => (status_for(e.code()), PageOutcome::Error(e.user_message())),
    };

    let page = render_page(&handlers.schema, &fields, Some(&outcome));
    (status, Html(page)).into_response()
}

/// POST /api/v1/predictions - Score a complete field set
pub async fn create_prediction(
    State(handlers): State<FormHandlers>,
    Json(req): Json<PredictionRequest>,
) -> Response {
    let cmd = SubmitFormCommand {
        fields: req.into_raw(),
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response = PredictionResponse {
                verdict: (&result.verdict).into(),
                record: result.record,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_prediction_error(e),
    }
}

fn handle_prediction_error(error: PredictionError) -> Response {
    let code = error.code();
    let mut body = ErrorResponse::new(code, error.user_message());
    if let Some(field) = error.field() {
        body = body.with_details(serde_json::json!({ "field": field }));
    }
    body.into_response_for(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ScoringError;
    use crate::domain::intake::BatchRejection;
    use crate::ports::ScorerError;

    #[test]
    fn missing_field_maps_to_422() {
        let error = PredictionError::from(BatchRejection::Missing {
            field: "tenure".to_string(),
        });
        let response = handle_prediction_error(error);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn scoring_failure_maps_to_503() {
        let error = PredictionError::from(ScoringError::from(ScorerError::Timeout {
            timeout_secs: 5,
        }));
        let response = handle_prediction_error(error);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
