use crate::error::{Error, Result};
use crate::utils::validation::validate_url;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RSS_URL: &str = "https://distrowatch.com/news/dw.xml";
pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/get?url=";
pub const DEFAULT_MAX_ITEMS: usize = 5;
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;
/// Short date in the en-US style, e.g. `1/13/2025`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub feed: FeedSettings,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSettings {
    pub rss_url: String,
    pub proxy_url: String,
    pub max_items: usize,
    pub description_limit: usize,
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            rss_url: DEFAULT_RSS_URL.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("newsfeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let rss_url = std::env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_RSS_URL.to_string());

        let proxy_url =
            std::env::var("PROXY_URL").unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string());

        let max_items = std::env::var("FEED_MAX_ITEMS")
            .unwrap_or_else(|_| DEFAULT_MAX_ITEMS.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FEED_MAX_ITEMS value".to_string()))?;

        let description_limit = std::env::var("FEED_DESCRIPTION_LIMIT")
            .unwrap_or_else(|_| DEFAULT_DESCRIPTION_LIMIT.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FEED_DESCRIPTION_LIMIT value".to_string()))?;

        let date_format =
            std::env::var("FEED_DATE_FORMAT").unwrap_or_else(|_| DEFAULT_DATE_FORMAT.to_string());

        let timeout_seconds = std::env::var("HTTP_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid HTTP_TIMEOUT_SECONDS value".to_string()))?;

        Ok(Settings {
            feed: FeedSettings {
                rss_url,
                proxy_url,
                max_items,
                description_limit,
                date_format,
            },
            http: HttpConfig {
                timeout_seconds,
                ..HttpConfig::default()
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.feed.rss_url)
            .map_err(|e| Error::Config(format!("FEED_URL is not usable: {e}")))?;
        validate_url(&self.feed.proxy_url)
            .map_err(|e| Error::Config(format!("PROXY_URL is not usable: {e}")))?;

        if self.feed.max_items == 0 {
            return Err(Error::Config("Max items must be non-zero".to_string()));
        }

        if StrftimeItems::new(&self.feed.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "Invalid date format: {}",
                self.feed.date_format
            )));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::Config("HTTP timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}
