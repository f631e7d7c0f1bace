//! Telegram bot integration and handlers

pub mod bot;
pub mod dispatcher;
pub mod format;
pub mod handlers;
pub mod keyboards;
pub mod messenger;
pub mod pages;
pub mod router;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use messenger::{CallbackAnswer, CallbackRef, Messenger, TelegramMessenger};

/// Bot type used across handlers.
pub type Bot = teloxide::Bot;
