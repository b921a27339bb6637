//! Turns intake replies into chat messages.

use crate::application::handlers::intake::{IntakeError, IntakeReply};
use crate::domain::intake::{render_prompt, IntakeSession, ProtocolError, PromptSpec};

use super::callback;

pub const WELCOME: &str =
    "Welcome to the churn prediction bot!\nPlease answer the following questions.";

/// One button: label and callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

/// Text to show plus an optional inline keyboard (one button per row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub keyboard: Option<Vec<Button>>,
}

impl ChatMessage {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn prompt(session: &IntakeSession, prompt: &PromptSpec, preface: Option<String>) -> Self {
        let body = render_prompt(session, prompt);
        let text = match preface {
            Some(preface) => format!("{}\n\n{}", preface, body),
            None => body,
        };
        let keyboard = prompt.options.as_ref().map(|options| {
            options
                .iter()
                .map(|option| Button {
                    label: option.clone(),
                    data: callback::encode(prompt.order, option),
                })
                .collect()
        });
        Self { text, keyboard }
    }
}

/// Message for a reply, with `preface` shown before a prompt.
pub fn render_reply(reply: &IntakeReply, preface: Option<&str>) -> ChatMessage {
    match reply {
        IntakeReply::Prompt { session, prompt } => {
            ChatMessage::prompt(session, prompt, preface.map(str::to_string))
        }
        IntakeReply::Rejected {
            session,
            reason,
            prompt,
        } => ChatMessage::prompt(session, prompt, Some(format!("{}. Please try again.", reason))),
        IntakeReply::Completed { verdict, .. } => ChatMessage::plain(verdict.summary()),
        IntakeReply::ScoringFailed { error, .. } => ChatMessage::plain(error.user_message()),
        IntakeReply::Cancelled { .. } => ChatMessage::plain(
            "Cancelled. Your answers were cleared. Send /start to begin again.",
        ),
    }
}

/// Short notice for an event that could not be applied.
pub fn render_error(error: &IntakeError) -> String {
    match error {
        IntakeError::NotFound(_) => "No prediction in progress. Send /start to begin.".to_string(),
        IntakeError::Protocol(ProtocolError::AlreadyComplete) => {
            "All answers are already in. Send /start to begin again.".to_string()
        }
        IntakeError::Protocol(_) => {
            "That button belongs to an earlier question. Please answer the current one."
                .to_string()
        }
        IntakeError::Storage(_) => "Sorry, something went wrong. Please try again later.".to_string(),
    }
}
