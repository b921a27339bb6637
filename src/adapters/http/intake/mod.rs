//! HTTP adapter for the step-by-step intake endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerRequest, IntakeOutcome, IntakeReplyResponse, IntakeStateResponse, ProgressResponse,
    RejectionResponse, VerdictResponse,
};
pub use handlers::IntakeHandlers;
pub use routes::intake_routes;
