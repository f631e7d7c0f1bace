//! Outbound side of the bot: the only place that talks to the Bot API.

use async_trait::async_trait;
use campuscore::AppResult;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

use super::pages::PageRender;
use super::Bot;

/// The callback being answered and the message it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRef {
    pub id: String,
    pub chat_id: i64,
    /// Absent when the originating message is too old or inaccessible.
    pub message_id: Option<i32>,
}

/// How to answer a button press.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAnswer {
    /// Acknowledge only, optionally with a transient notification.
    Notification(Option<String>),
    /// Acknowledge and replace the originating message with a page.
    Replace(PageRender),
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_page(&self, chat_id: i64, page: &PageRender) -> AppResult<()>;

    /// Plain text, no markup.
    async fn send_text(&self, chat_id: i64, text: &str) -> AppResult<()>;

    async fn answer_callback(&self, callback: &CallbackRef, answer: CallbackAnswer) -> AppResult<()>;
}

/// [`Messenger`] over a teloxide [`Bot`].
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn acknowledge(&self, callback: &CallbackRef, text: Option<String>) -> Result<(), RequestError> {
        let mut request = self.bot.answer_callback_query(CallbackQueryId(callback.id.clone()));
        if let Some(text) = text {
            request = request.text(text);
        }
        request.await?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_page(&self, chat_id: i64, page: &PageRender) -> AppResult<()> {
        self.bot
            .send_message(ChatId(chat_id), page.text.clone())
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(page.keyboard.clone())
            .await?;
        Ok(())
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> AppResult<()> {
        self.bot.send_message(ChatId(chat_id), text.to_string()).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback: &CallbackRef, answer: CallbackAnswer) -> AppResult<()> {
        match answer {
            CallbackAnswer::Notification(text) => {
                self.acknowledge(callback, text).await?;
            }
            CallbackAnswer::Replace(page) => {
                // Stops the client-side spinner; the edit below is what matters.
                if let Err(e) = self.acknowledge(callback, None).await {
                    log::warn!("Failed to answer callback {}: {}", callback.id, e);
                }

                let Some(message_id) = callback.message_id else {
                    return Err(campuscore::AppError::Validation(
                        "callback has no message to edit".to_string(),
                    ));
                };

                let result = self
                    .bot
                    .edit_message_text(ChatId(callback.chat_id), MessageId(message_id), page.text)
                    .parse_mode(ParseMode::MarkdownV2)
                    .reply_markup(page.keyboard)
                    .await;
                match result {
                    Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => {}
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(())
    }
}
