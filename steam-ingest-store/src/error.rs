/// Errors that can occur while talking to the storefront or loading settings.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by the Steam storefront")]
    RateLimit,

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// First 200 characters of a response body, for error messages.
pub(crate) fn excerpt(text: &str) -> String {
    text.chars().take(200).collect()
}
