//! Telegram front end.
//!
//! `/start` begins (or restarts) an intake, `/cancel` clears it. Choice
//! fields are answered with inline buttons, scalar fields with free text.

mod bot;
mod callback;
mod render;

pub use bot::{run_bot, Command, TelegramHandlers};
pub use render::{render_error, render_reply, Button, ChatMessage};
