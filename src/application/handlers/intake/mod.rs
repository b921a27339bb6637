//! Intake command and query handlers.
//!
//! One event from any transport maps to one handler call, which performs
//! exactly one pass through the collection state machine.

mod cancel_intake;
mod errors;
mod get_intake_progress;
mod reply;
mod start_intake;
mod submit_answer;

pub use cancel_intake::{CancelIntakeCommand, CancelIntakeHandler};
pub use errors::IntakeError;
pub use get_intake_progress::{GetIntakeProgressHandler, GetIntakeProgressQuery, IntakeProgress};
pub use reply::IntakeReply;
pub use start_intake::{StartIntakeCommand, StartIntakeHandler};
pub use submit_answer::{AnswerTarget, SubmitAnswerCommand, SubmitAnswerHandler};
