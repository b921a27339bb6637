//! HTTP handlers for the intake endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::intake::{
    AnswerTarget, CancelIntakeCommand, CancelIntakeHandler, GetIntakeProgressHandler,
    GetIntakeProgressQuery, IntakeError, IntakeReply, StartIntakeCommand, StartIntakeHandler,
    SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::foundation::{ConversationKey, SessionId};
use crate::domain::intake::RawInput;

use super::dto::{
    AnswerRequest, IntakeOutcome, IntakeReplyResponse, IntakeStateResponse, ProgressResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IntakeHandlers {
    start_handler: Arc<StartIntakeHandler>,
    answer_handler: Arc<SubmitAnswerHandler>,
    cancel_handler: Arc<CancelIntakeHandler>,
    progress_handler: Arc<GetIntakeProgressHandler>,
    total_fields: usize,
}

impl IntakeHandlers {
    pub fn new(
        start_handler: Arc<StartIntakeHandler>,
        answer_handler: Arc<SubmitAnswerHandler>,
        cancel_handler: Arc<CancelIntakeHandler>,
        progress_handler: Arc<GetIntakeProgressHandler>,
        total_fields: usize,
    ) -> Self {
        Self {
            start_handler,
            answer_handler,
            cancel_handler,
            progress_handler,
            total_fields,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/intake - Start a new intake
pub async fn start_intake(State(handlers): State<IntakeHandlers>) -> Response {
    let key = ConversationKey::http(SessionId::new());

    match handlers.start_handler.handle(StartIntakeCommand { key }).await {
        Ok(reply) => reply_response(&handlers, reply, StatusCode::CREATED),
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/v1/intake/:id - Current progress
pub async fn get_intake(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetIntakeProgressQuery {
        key: ConversationKey::http(session_id),
    };

    match handlers.progress_handler.handle(query).await {
        Ok(progress) => {
            let response = IntakeStateResponse {
                session_id: session_id.to_string(),
                complete: progress.session.is_complete(),
                progress: ProgressResponse::new(
                    &progress.session,
                    progress.prompt,
                    progress.total_fields,
                ),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// POST /api/v1/intake/:id/answers - Answer one field
pub async fn submit_answer(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitAnswerCommand {
        key: ConversationKey::http(session_id),
        target: req.field.map_or(AnswerTarget::Current, AnswerTarget::Named),
        input: RawInput::text(req.value.into_raw()),
    };

    match handlers.answer_handler.handle(cmd).await {
        Ok(reply) => reply_response(&handlers, reply, StatusCode::OK),
        Err(e) => handle_intake_error(e),
    }
}

/// POST /api/v1/intake/:id/cancel - Discard answers and start over
pub async fn cancel_intake(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CancelIntakeCommand {
        key: ConversationKey::http(session_id),
    };

    match handlers.cancel_handler.handle(cmd).await {
        Ok(reply) => reply_response(&handlers, reply, StatusCode::OK),
        Err(e) => handle_intake_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Reply and error mapping
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn reply_response(handlers: &IntakeHandlers, reply: IntakeReply, success: StatusCode) -> Response {
    let total = handlers.total_fields;
    match reply {
        IntakeReply::Prompt { session, prompt } => {
            let body = IntakeReplyResponse::progress(
                IntakeOutcome::Prompt,
                session.id(),
                ProgressResponse::new(&session, Some(prompt), total),
            );
            (success, Json(body)).into_response()
        }
        IntakeReply::Rejected {
            session,
            reason,
            prompt,
        } => {
            let body = IntakeReplyResponse::rejected(
                session.id(),
                ProgressResponse::new(&session, Some(prompt), total),
                &reason,
            );
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        IntakeReply::Completed {
            session_id,
            verdict,
            ..
        } => (
            StatusCode::OK,
            Json(IntakeReplyResponse::completed(session_id, &verdict)),
        )
            .into_response(),
        IntakeReply::ScoringFailed { session_id, error } => {
            ErrorResponse::new(error.code(), error.user_message())
                .with_details(serde_json::json!({ "session_id": session_id.to_string() }))
                .into_response_for(error.code())
        }
        IntakeReply::Cancelled { session, prompt } => {
            let body = IntakeReplyResponse::progress(
                IntakeOutcome::Cancelled,
                session.id(),
                ProgressResponse::new(&session, prompt, total),
            );
            (StatusCode::OK, Json(body)).into_response()
        }
    }
}

fn handle_intake_error(error: IntakeError) -> Response {
    if let IntakeError::Storage(ref e) = error {
        tracing::error!(error = %e, "Session store failure");
    }
    let code = error.code();
    ErrorResponse::new(code, error.message()).into_response_for(code)
}
