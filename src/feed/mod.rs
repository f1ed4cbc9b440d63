// Feed pipeline: fetch through the proxy, parse, normalize, render

pub mod client;
pub mod document;
pub mod parser;
pub mod render;

pub use client::{NetworkClient, ProxyEnvelope, ProxyResponse, ReqwestClient};
pub use document::{DomParser, ItemNode, XmlDocument, XmlDomParser, XmlElement, XML_MIME_TYPE};
pub use parser::FeedItem;
pub use render::{FeedStyles, StyleGroup};

use crate::config::FeedSettings;
use crate::error::{Error, Result};
use parser::{normalize_item, ITEM_SELECTOR};
use tracing::{debug, error, warn};

/// Fetches one feed through a CORS proxy and turns its items into HTML.
///
/// Holds configuration only; nothing is cached between calls, so a single
/// manager can be shared freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedManager {
    settings: FeedSettings,
}

impl FeedManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &FeedSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    pub fn rss_url(&self) -> &str {
        &self.settings.rss_url
    }

    pub fn proxy_url(&self) -> &str {
        &self.settings.proxy_url
    }

    pub fn max_items(&self) -> usize {
        self.settings.max_items
    }

    /// Proxy URL with the percent-encoded feed URL appended
    pub fn request_url(&self) -> String {
        format!(
            "{}{}",
            self.settings.proxy_url,
            urlencoding::encode(&self.settings.rss_url)
        )
    }

    /// Fetch and normalize the feed, parsing it with [`XmlDomParser`]
    pub async fn fetch_rss<C>(&self, client: &C) -> Result<Vec<FeedItem>>
    where
        C: NetworkClient + ?Sized,
    {
        self.fetch_rss_with(client, &XmlDomParser).await
    }

    /// Fetch and normalize the feed with explicit collaborators.
    ///
    /// Failures are logged once and returned unchanged; there is no retry.
    pub async fn fetch_rss_with<C, P>(&self, client: &C, parser: &P) -> Result<Vec<FeedItem>>
    where
        C: NetworkClient + ?Sized,
        P: DomParser + ?Sized,
    {
        self.fetch_items(client, parser)
            .await
            .inspect_err(|e| error!("Error fetching RSS: {}", e.log_safe()))
    }

    async fn fetch_items<C, P>(&self, client: &C, parser: &P) -> Result<Vec<FeedItem>>
    where
        C: NetworkClient + ?Sized,
        P: DomParser + ?Sized,
    {
        let url = self.request_url();
        debug!("Requesting feed via proxy: {}", url);

        let response = client.get(&url).await?;
        if !response.ok() {
            return Err(Error::Network(format!("HTTP {}", response.status())));
        }

        let envelope: ProxyEnvelope = response.json()?;
        let contents = envelope.contents.unwrap_or_else(|| {
            warn!("Proxy response has no contents for {}", self.settings.rss_url);
            String::new()
        });

        let document = parser.parse_from_str(&contents, XML_MIME_TYPE);
        let nodes = document.query_selector_all(ITEM_SELECTOR);
        debug!("Feed document holds {} items", nodes.len());

        Ok(self.parse_items(nodes))
    }

    /// Normalize raw item nodes, keeping at most `max_items` in input order.
    /// Missing fields fall back to defaults; this never fails.
    pub fn parse_items<I>(&self, nodes: I) -> Vec<FeedItem>
    where
        I: IntoIterator,
        I::Item: ItemNode,
    {
        nodes
            .into_iter()
            .take(self.settings.max_items)
            .map(|node| {
                normalize_item(
                    &node,
                    self.settings.description_limit,
                    &self.settings.date_format,
                )
            })
            .collect()
    }

    pub fn generate_html(&self, items: &[FeedItem]) -> String {
        render::render_items(items)
    }

    /// [`FeedManager::generate_html`] with escaped fields and a cleaned
    /// description
    pub fn generate_sanitized_html(&self, items: &[FeedItem]) -> String {
        render::render_items_sanitized(items)
    }

    /// Expected style values for the feed section. Fixed data for checks,
    /// not computed from any stylesheet.
    pub fn verify_styling(&self) -> FeedStyles {
        FeedStyles::default()
    }
}
