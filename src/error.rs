use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed proxy response: {0}")]
    Envelope(serde_json::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Transport errors may embed the proxied URL, so only their kind is kept
    pub fn log_safe(&self) -> String {
        match self {
            Error::Network(msg) => format!("Network request failed: {msg}"),
            Error::Http(e) if e.is_timeout() => "HTTP request timed out".to_string(),
            Error::Http(e) if e.is_connect() => "HTTP connection failed".to_string(),
            Error::Http(_) => "External HTTP request failed".to_string(),
            Error::Envelope(e) => format!("Malformed proxy response: {e}"),
            Error::Json(e) => format!("JSON error: {e}"),
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}
