//! Telegram dispatcher wiring the bot to the intake handlers.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::command::BotCommands,
};

use crate::application::handlers::intake::{
    AnswerTarget, CancelIntakeCommand, CancelIntakeHandler, StartIntakeCommand,
    StartIntakeHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::foundation::ConversationKey;
use crate::domain::intake::RawInput;

use super::callback;
use super::render::{render_error, render_reply, Button, ChatMessage, WELCOME};

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "start a new prediction")]
    Start,
    #[command(description = "cancel and clear your answers")]
    Cancel,
}

/// Intake handlers shared by every chat.
pub struct TelegramHandlers {
    pub start: Arc<StartIntakeHandler>,
    pub answer: Arc<SubmitAnswerHandler>,
    pub cancel: Arc<CancelIntakeHandler>,
}

/// Runs long polling until the process is interrupted.
pub async fn run_bot(bot: Bot, handlers: Arc<TelegramHandlers>) {
    tracing::info!("Starting Telegram bot");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(on_command),
                )
                .branch(dptree::endpoint(on_text)),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handlers])
        .default_handler(|_| async {})
        .build()
        .dispatch()
        .await;
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    handlers: Arc<TelegramHandlers>,
) -> ResponseResult<()> {
    let key = ConversationKey::chat(msg.chat.id.0);

    let message = match cmd {
        Command::Start => match handlers.start.handle(StartIntakeCommand { key }).await {
            Ok(reply) => render_reply(&reply, Some(WELCOME)),
            Err(e) => plain(render_error(&e)),
        },
        Command::Cancel => match handlers.cancel.handle(CancelIntakeCommand { key }).await {
            Ok(reply) => render_reply(&reply, None),
            Err(e) => plain(render_error(&e)),
        },
    };

    send(&bot, msg.chat.id, message).await
}

async fn on_text(bot: Bot, msg: Message, handlers: Arc<TelegramHandlers>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let cmd = SubmitAnswerCommand {
        key: ConversationKey::chat(msg.chat.id.0),
        target: AnswerTarget::Current,
        input: RawInput::text(text),
    };

    let message = match handlers.answer.handle(cmd).await {
        Ok(reply) => render_reply(&reply, None),
        Err(e) => plain(render_error(&e)),
    };

    send(&bot, msg.chat.id, message).await
}

async fn on_callback(
    bot: Bot,
    q: CallbackQuery,
    handlers: Arc<TelegramHandlers>,
) -> ResponseResult<()> {
    let (Some(data), Some(message)) = (q.data.as_deref(), q.regular_message()) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let Some((order, value)) = callback::parse(data) else {
        tracing::debug!(data, "Ignoring malformed callback data");
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let cmd = SubmitAnswerCommand {
        key: ConversationKey::chat(message.chat.id.0),
        target: AnswerTarget::Order(order),
        input: RawInput::selection(value),
    };

    match handlers.answer.handle(cmd).await {
        Ok(reply) => {
            bot.answer_callback_query(q.id.clone()).await?;
            let rendered = render_reply(&reply, None);
            let edit = bot.edit_message_text(message.chat.id, message.id, rendered.text);
            match rendered.keyboard {
                Some(buttons) => edit.reply_markup(keyboard(buttons)).await?,
                None => edit.await?,
            };
        }
        Err(e) => {
            bot.answer_callback_query(q.id.clone())
                .text(render_error(&e))
                .await?;
        }
    }

    Ok(())
}

async fn send(bot: &Bot, chat_id: ChatId, message: ChatMessage) -> ResponseResult<()> {
    let request = bot.send_message(chat_id, message.text);
    match message.keyboard {
        Some(buttons) => request.reply_markup(keyboard(buttons)).await?,
        None => request.await?,
    };
    Ok(())
}

fn plain(text: String) -> ChatMessage {
    ChatMessage {
        text,
        keyboard: None,
    }
}

fn keyboard(buttons: Vec<Button>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        buttons
            .into_iter()
            .map(|b| vec![InlineKeyboardButton::callback(b.label, b.data)]),
    )
}
