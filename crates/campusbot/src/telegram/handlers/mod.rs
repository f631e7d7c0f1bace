//! Telegram bot handler tree configuration
//!
//! Converts teloxide updates into [`InboundUpdate`](crate::InboundUpdate)s
//! and hands them to the dispatcher. The same schema is used in production
//! and in tests.

mod schema;
mod types;

pub use schema::schema;
pub use types::{callback_update, message_update, start_update, HandlerDeps, HandlerError};
