//! Page renderers.
//!
//! Each page is rebuilt from scratch on every interaction: backend data is
//! fetched fresh, the only local state consulted is the user's subgroup
//! preference. Backend failures never escape a renderer; they turn into an
//! in-page message with working navigation.

use std::sync::Arc;

use campuscore::core::config;
use campuscore::{PreferenceStore, UniversityApi};
use teloxide::types::InlineKeyboardMarkup;

mod auth;
mod main_page;
mod maps;
mod profile;
mod services;
mod teachers;

use super::format::header;
use super::keyboards;

/// Rendered page: MarkdownV2 text plus inline keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRender {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

impl PageRender {
    pub fn new(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}

/// Deployment-specific links shown on pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSettings {
    pub web_app_url: Option<String>,
    pub admin_panel_url: Option<String>,
}

impl PageSettings {
    pub fn from_config() -> Self {
        Self {
            web_app_url: config::WEB_APP_URL.clone(),
            admin_panel_url: config::ADMIN_PANEL_URL.clone(),
        }
    }
}

/// Builds every page from backend data and the user's preference.
#[derive(Clone)]
pub struct Pages {
    api: Arc<dyn UniversityApi>,
    preferences: Arc<dyn PreferenceStore>,
    settings: PageSettings,
}

impl Pages {
    pub fn new(api: Arc<dyn UniversityApi>, preferences: Arc<dyn PreferenceStore>, settings: PageSettings) -> Self {
        Self {
            api,
            preferences,
            settings,
        }
    }

    pub fn preferences(&self) -> &Arc<dyn PreferenceStore> {
        &self.preferences
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    fn web_app(&self) -> Option<&str> {
        self.settings.web_app_url.as_deref()
    }

    /// `-------Ошибка-----------` page with the given message.
    fn error_page(&self, message: &str, keyboard: InlineKeyboardMarkup) -> PageRender {
        PageRender::new(
            format!("{}\n\n{}", header("Ошибка"), super::format::escape(message)),
            keyboard,
        )
    }

    fn error_with_nav(&self, message: &str) -> PageRender {
        self.error_page(message, keyboards::nav_menu(self.web_app()))
    }
}

/// Number of pages for `len` entries; zero when there are none.
pub(crate) fn total_pages(len: usize) -> usize {
    len.div_ceil(config::pagination::PAGE_SIZE)
}

/// Clamps `page` into range and returns it with the slice of entries it shows.
pub(crate) fn page_slice<T>(entries: &[T], page: usize) -> (usize, &[T]) {
    let total = total_pages(entries.len());
    let page = page.min(total.saturating_sub(1));
    let start = page * config::pagination::PAGE_SIZE;
    let end = (start + config::pagination::PAGE_SIZE).min(entries.len());
    (page, &entries[start.min(end)..end])
}
