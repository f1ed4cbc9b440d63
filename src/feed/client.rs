use crate::config::HttpConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Fetch capability used by [`FeedManager`](super::FeedManager).
///
/// Implementations only move bytes: status handling and body decoding are
/// left to the caller, so test doubles can stand in without a socket.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<ProxyResponse>;
}

/// Response returned by a [`NetworkClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    status: u16,
    body: String,
}

impl ProxyResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Error::Envelope)
    }
}

/// Body of the CORS proxy: the proxied document travels in `contents`.
/// The relay reports `null` when the upstream fetch failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyEnvelope {
    #[serde(default)]
    pub contents: Option<String>,
}

/// reqwest-backed [`NetworkClient`]
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl NetworkClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<ProxyResponse> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Proxy answered with HTTP {}", status);
        }

        let body = response.text().await?;
        Ok(ProxyResponse::new(status.as_u16(), body))
    }
}
