//! Campus bot - Telegram front end of the university assistant.
//!
//! Every interaction is re-rendered from scratch: the tapped button's token,
//! the user's subgroup preference and fresh backend data fully determine the
//! page that comes back.
//!
//! # Module Structure
//!
//! - `telegram::pages`: page renderers (text + inline keyboard)
//! - `telegram::router`: action tokens and the navigation state machine
//! - `telegram::dispatcher`: update classification and the auth gate
//! - `telegram::messenger`: outbound capability over the Bot API
//! - `telegram::handlers`: dptree schema wiring teloxide into the dispatcher
//! - `cli`: command line interface

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod telegram;

pub use telegram::dispatcher::{Dispatcher, InboundUpdate, MessagePolicy};
pub use telegram::pages::{PageRender, PageSettings, Pages};
pub use telegram::router::{Action, RouteOutcome, Router};
