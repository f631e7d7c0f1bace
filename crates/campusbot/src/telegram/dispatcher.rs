//! Update classification, auth gate and page delivery.

use std::sync::Arc;

use campuscore::core::config;
use campuscore::schedule::DayTab;
use campuscore::{AppResult, UniversityApi};
use chrono::NaiveDate;
use strum::{Display, EnumString};

use super::messenger::{CallbackAnswer, CallbackRef, Messenger};
use super::pages::PageRender;
use super::router::{Action, RouteOutcome, Router};

/// Transport-neutral inbound update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundUpdate {
    MessageCreated {
        user_id: i64,
        chat_id: i64,
        text: Option<String>,
    },
    Callback {
        user_id: i64,
        callback: CallbackRef,
        payload: String,
    },
    BotStarted {
        user_id: i64,
        chat_id: i64,
    },
}

impl InboundUpdate {
    pub fn user_id(&self) -> i64 {
        match self {
            InboundUpdate::MessageCreated { user_id, .. }
            | InboundUpdate::Callback { user_id, .. }
            | InboundUpdate::BotStarted { user_id, .. } => *user_id,
        }
    }
}

/// What a plain text message triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MessagePolicy {
    /// Reply with the main page.
    #[default]
    #[strum(serialize = "main")]
    MainPage,
    /// Echo the text back.
    #[strum(serialize = "echo")]
    Echo,
}

impl MessagePolicy {
    /// Reads `MESSAGE_MODE`; unknown values fall back to [`MessagePolicy::MainPage`].
    pub fn from_config() -> Self {
        config::MESSAGE_MODE.parse().unwrap_or_else(|_| {
            log::warn!("Unknown MESSAGE_MODE {:?}, using main page", config::MESSAGE_MODE.as_str());
            MessagePolicy::MainPage
        })
    }
}

/// Source of "today" for schedule tabs.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Handles one update at a time; holds no per-user state.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn UniversityApi>,
    router: Router,
    messenger: Arc<dyn Messenger>,
    policy: MessagePolicy,
    clock: Clock,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn UniversityApi>,
        router: Router,
        messenger: Arc<dyn Messenger>,
        policy: MessagePolicy,
    ) -> Self {
        Self {
            api,
            router,
            messenger,
            policy,
            clock: Arc::new(local_today),
        }
    }

    /// Replaces the local-date clock, mostly for tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> MessagePolicy {
        self.policy
    }

    /// Processes one update. Page build failures never reach here; the only
    /// error returned is a failed final delivery attempt.
    pub async fn handle(&self, update: InboundUpdate) -> AppResult<()> {
        match update {
            InboundUpdate::MessageCreated { user_id, chat_id, text } => {
                self.on_message(user_id, chat_id, text.as_deref()).await
            }
            InboundUpdate::BotStarted { user_id, chat_id } => {
                log::info!("User {} started the bot", user_id);
                let page = self.gated_main_page(user_id).await;
                self.messenger.send_page(chat_id, &page).await
            }
            InboundUpdate::Callback {
                user_id,
                callback,
                payload,
            } => self.on_callback(user_id, callback, &payload).await,
        }
    }

    async fn on_message(&self, user_id: i64, chat_id: i64, text: Option<&str>) -> AppResult<()> {
        if !self.is_linked(user_id).await {
            return self.messenger.send_page(chat_id, &self.router.pages().auth_page()).await;
        }

        match self.policy {
            MessagePolicy::MainPage => {
                let page = self.router.pages().main_page(user_id, DayTab::Today, (self.clock)()).await;
                self.messenger.send_page(chat_id, &page).await
            }
            MessagePolicy::Echo => {
                let reply = match text.map(str::trim).filter(|t| !t.is_empty()) {
                    Some(text) => format!("Вы написали: {}", text),
                    None => "Вы отправили сообщение без текста".to_string(),
                };
                self.messenger.send_text(chat_id, &reply).await
            }
        }
    }

    async fn on_callback(&self, user_id: i64, callback: CallbackRef, payload: &str) -> AppResult<()> {
        if !self.is_linked(user_id).await {
            return self.deliver(&callback, self.router.pages().auth_page()).await;
        }

        let action = Action::parse(payload);
        log::debug!("User {} pressed {:?} -> {:?}", user_id, payload, action);

        match self.router.route(user_id, &action, (self.clock)()).await {
            RouteOutcome::Render(page) => self.deliver(&callback, page).await,
            RouteOutcome::Notify(text) => {
                if let Err(e) = self
                    .messenger
                    .answer_callback(&callback, CallbackAnswer::Notification(text))
                    .await
                {
                    log::warn!("Failed to answer callback for user {}: {}", user_id, e);
                }
                Ok(())
            }
        }
    }

    /// Edits the originating message; sends a new one if that fails.
    async fn deliver(&self, callback: &CallbackRef, page: PageRender) -> AppResult<()> {
        match self
            .messenger
            .answer_callback(callback, CallbackAnswer::Replace(page.clone()))
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!("Failed to edit message in chat {}, sending a new one: {}", callback.chat_id, e);
                self.messenger.send_page(callback.chat_id, &page).await
            }
        }
    }

    async fn gated_main_page(&self, user_id: i64) -> PageRender {
        if self.is_linked(user_id).await {
            self.router.pages().main_page(user_id, DayTab::Today, (self.clock)()).await
        } else {
            self.router.pages().auth_page()
        }
    }

    /// Auth gate: any failure to confirm the link counts as "not linked".
    async fn is_linked(&self, user_id: i64) -> bool {
        match self.api.get_student_status(user_id).await {
            Ok(status) => status.is_linked,
            Err(e) => {
                log::warn!("Failed to check link status for user {}: {}", user_id, e);
                false
            }
        }
    }
}
