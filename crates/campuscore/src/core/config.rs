//! Configuration constants for the bot
//!
//! Every value is read once from the environment. Call `dotenvy::dotenv()`
//! before the first access if a `.env` file should be honoured.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL (local telegram-bot-api)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Base URL of the university backend API
/// Read from UNIVERSITY_API_URL environment variable
/// Default: https://max-api.cloudpub.ru
pub static UNIVERSITY_API_URL: Lazy<String> = Lazy::new(|| {
    non_empty_var("UNIVERSITY_API_URL").unwrap_or_else(|| "https://max-api.cloudpub.ru".to_string())
});

/// Public URL of the student web application
/// Read from WEB_APP_URL environment variable
/// When unset, pages are rendered without the web-app row
pub static WEB_APP_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("WEB_APP_URL"));

/// URL of the administration panel, shown as a link on the profile page
/// Read from ADMIN_PANEL_URL environment variable
pub static ADMIN_PANEL_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("ADMIN_PANEL_URL"));

/// Path of the subgroup preferences file
/// Read from SUBGROUP_SETTINGS_PATH environment variable
/// Default: subgroup_settings.csv
pub static SUBGROUP_SETTINGS_PATH: Lazy<String> =
    Lazy::new(|| non_empty_var("SUBGROUP_SETTINGS_PATH").unwrap_or_else(|| "subgroup_settings.csv".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: campusbot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| non_empty_var("LOG_FILE_PATH").unwrap_or_else(|| "campusbot.log".to_string()));

/// What a plain (non-command) text message triggers: `main` or `echo`
/// Read from MESSAGE_MODE environment variable
/// Default: main
pub static MESSAGE_MODE: Lazy<String> =
    Lazy::new(|| non_empty_var("MESSAGE_MODE").unwrap_or_else(|| "main".to_string()));

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for backend API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Paginated directory configuration
pub mod pagination {
    /// Entries per page in the teacher and building directories
    pub const PAGE_SIZE: usize = 20;
}

/// Text layout configuration
pub mod layout {
    /// Width of the underscore separator line
    pub const SEPARATOR_WIDTH: usize = 22;

    /// Width of the time column in schedule lines
    pub const TIME_COLUMN_WIDTH: usize = 7;
}
