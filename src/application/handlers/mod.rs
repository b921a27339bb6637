//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;
pub mod prediction;

pub use intake::{
    AnswerTarget, CancelIntakeCommand, CancelIntakeHandler, GetIntakeProgressHandler,
    GetIntakeProgressQuery, IntakeError, IntakeProgress, IntakeReply, StartIntakeCommand,
    StartIntakeHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
pub use prediction::{PredictionError, SubmitFormCommand, SubmitFormHandler, SubmitFormResult};
