//! Handler types, dependencies and update conversion helpers

use std::sync::Arc;

use teloxide::types::{CallbackQuery, Message, User};

use crate::telegram::dispatcher::{Dispatcher, InboundUpdate};
use crate::telegram::messenger::CallbackRef;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub dispatcher: Arc<Dispatcher>,
}

impl HandlerDeps {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

fn user_id(user: &User) -> i64 {
    i64::try_from(user.id.0).unwrap_or_default()
}

fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map(user_id).unwrap_or(msg.chat.id.0)
}

/// `/start` as a bot-started update.
pub fn start_update(msg: &Message) -> InboundUpdate {
    InboundUpdate::BotStarted {
        user_id: sender_id(msg),
        chat_id: msg.chat.id.0,
    }
}

/// Plain message as a message-created update. Messages without a sender
/// (channel posts) are attributed to the chat.
pub fn message_update(msg: &Message) -> InboundUpdate {
    InboundUpdate::MessageCreated {
        user_id: sender_id(msg),
        chat_id: msg.chat.id.0,
        text: msg.text().map(str::to_string),
    }
}

/// Callback query as a button-callback update; `None` without payload.
pub fn callback_update(q: &CallbackQuery) -> Option<InboundUpdate> {
    let payload = q.data.clone()?;
    let user_id = user_id(&q.from);
    Some(InboundUpdate::Callback {
        user_id,
        callback: CallbackRef {
            id: q.id.0.clone(),
            chat_id: q.message.as_ref().map(|m| m.chat().id.0).unwrap_or(user_id),
            message_id: q.message.as_ref().map(|m| m.id().0),
        },
        payload,
    })
}
