use thiserror::Error;

/// Centralized error types for the application
///
/// Gateway, preference-store and transport failures are all converted to this
/// enum so the page renderer can degrade on any of them the same way.
///
/// # Example
///
/// ```no_run
/// use campuscore::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport-level HTTP errors (timeout, connection refused, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-200 status
    #[error("API returned status {status}: {body}")]
    HttpStatus { status: reqwest::StatusCode, body: String },

    /// Response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend envelope carried `success: false`
    #[error("API returned error: {0}")]
    Backend(String),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Telegram API errors
    #[cfg(feature = "telegram")]
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// True for failures that happened before a response was read
    /// (timeouts, DNS, refused connections).
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Http(_))
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
