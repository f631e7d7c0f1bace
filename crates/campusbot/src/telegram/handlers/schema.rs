//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{callback_update, message_update, start_update, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::dispatcher::InboundUpdate;
use crate::telegram::Bot;

/// Creates the dispatcher schema for the Telegram bot.
///
/// Order matters: commands are matched before the catch-all message branch.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

/// Dispatches one update, logging instead of failing the handler chain.
async fn dispatch(deps: &HandlerDeps, update: InboundUpdate) {
    let user_id = update.user_id();
    if let Err(e) = deps.dispatcher.handle(update).await {
        log::error!("Failed to handle update for user {}: {}", user_id, e);
    }
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |_bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => {
                        dispatch(&deps, start_update(&msg)).await;
                    }
                }
                Ok(())
            }
        },
    ))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |msg: Message| {
        let deps = deps.clone();
        async move {
            dispatch(&deps, message_update(&msg)).await;
            Ok(())
        }
    })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            match callback_update(&q) {
                Some(update) => dispatch(&deps, update).await,
                None => {
                    log::debug!("Callback {} without payload", q.id.0);
                    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                        log::warn!("Failed to answer callback {}: {}", q.id.0, e);
                    }
                }
            }
            Ok(())
        }
    })
}
