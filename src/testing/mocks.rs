//! Test doubles for the network and DOM collaborators.

use crate::error::{Error, Result};
use crate::feed::{ItemNode, NetworkClient, ProxyResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Canned [`NetworkClient`]: answers every URL with the same JSON payload, or
/// fails with `Network error`
#[derive(Debug)]
pub struct MockNetworkClient {
    payload: Value,
    should_fail: bool,
    requests: Mutex<Vec<String>>,
}

impl MockNetworkClient {
    pub fn new(payload: Value) -> Self {
        Self::with_failure(payload, false)
    }

    pub fn failing() -> Self {
        Self::with_failure(Value::Object(Default::default()), true)
    }

    pub fn with_failure(payload: Value, should_fail: bool) -> Self {
        Self {
            payload,
            should_fail,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl NetworkClient for MockNetworkClient {
    async fn get(&self, url: &str) -> Result<ProxyResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        if self.should_fail {
            return Err(Error::Network("Network error".to_string()));
        }

        Ok(ProxyResponse::new(200, self.payload.to_string()))
    }
}

/// Item node backed by a field map. Fields not in the map resolve to the
/// fallback text, or to absence when there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockItem {
    fields: HashMap<String, String>,
    fallback: Option<String>,
}

impl MockItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field answers with `text`
    pub fn uniform(text: impl Into<String>) -> Self {
        Self::new().with_fallback(text)
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.insert(name.into(), text.into());
        self
    }

    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }
}

impl ItemNode for MockItem {
    fn query_selector(&self, selector: &str) -> Option<String> {
        self.fields
            .get(selector)
            .or(self.fallback.as_ref())
            .cloned()
    }
}

/// Class list whose mutators do nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockClassList;

impl MockClassList {
    pub fn add(&self, _class: &str) {}

    pub fn remove(&self, _class: &str) {}
}

/// Element-shaped stand-in with empty content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    pub tag: String,
    pub inner_html: String,
    pub text_content: String,
    pub style: HashMap<String, String>,
    pub class_list: MockClassList,
}

impl MockElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn query_selector(&self, _selector: &str) -> MockElement {
        MockElement::new("div")
    }

    pub fn query_selector_all(&self, _selector: &str) -> Vec<MockElement> {
        Vec::new()
    }
}

impl ItemNode for MockElement {
    fn query_selector(&self, selector: &str) -> Option<String> {
        Some(MockElement::query_selector(self, selector).text_content)
    }
}

/// Document-shaped factory for [`MockElement`]s
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    elements: HashMap<String, MockElement>,
}

impl MockDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&self, tag: &str) -> MockElement {
        MockElement::new(tag)
    }

    /// The element registered under `id`, or a fresh `div`
    pub fn get_element_by_id(&self, id: &str) -> MockElement {
        self.elements
            .get(id)
            .cloned()
            .unwrap_or_else(|| self.create_element("div"))
    }

    pub fn set_element(&mut self, id: impl Into<String>, element: MockElement) {
        self.elements.insert(id.into(), element);
    }

    pub fn query_selector(&self, _selector: &str) -> MockElement {
        self.create_element("div")
    }

    pub fn query_selector_all(&self, _selector: &str) -> Vec<MockElement> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedManager;
    use serde_json::json;

    #[test]
    fn test_mock_item_field_map_with_fallback() {
        let item = MockItem::new()
            .with_field("title", "Only Title")
            .with_fallback("");
        assert_eq!(item.query_selector("title").as_deref(), Some("Only Title"));
        assert_eq!(item.query_selector("link").as_deref(), Some(""));

        let bare = MockItem::new().with_field("title", "T");
        assert_eq!(bare.query_selector("link"), None);
    }

    #[test]
    fn test_mock_dom_registry() {
        let mut dom = MockDom::new();
        let mut feed = dom.create_element("section");
        feed.inner_html = "<p>loading</p>".to_string();
        dom.set_element("rss-feed", feed.clone());

        assert_eq!(dom.get_element_by_id("rss-feed"), feed);
        assert_eq!(dom.get_element_by_id("missing").tag, "div");
        assert!(dom.query_selector_all("item").is_empty());
        assert!(dom.query_selector("item").text_content.is_empty());
    }

    #[test]
    fn test_mock_element_is_inert() {
        let element = MockDom::new().create_element("div");
        element.class_list.add("loading");
        element.class_list.remove("loading");
        assert!(element.style.is_empty());
        assert!(element.inner_html.is_empty());
        assert!(element.query_selector_all("item").is_empty());
    }

    #[test]
    fn test_mock_elements_parse_to_defaults() {
        let dom = MockDom::new();
        let nodes = vec![dom.create_element("item"), dom.get_element_by_id("x")];
        let items = FeedManager::new().parse_items(&nodes);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "No title");
        assert_eq!(items[0].link, "#");
        assert_eq!(items[0].pub_date, "Invalid Date");
    }

    #[tokio::test]
    async fn test_mock_client_ignores_url() {
        let client = MockNetworkClient::new(json!({ "contents": "<rss/>" }));
        let first = client.get("https://a.example").await.unwrap();
        let second = client.get("not even a url").await.unwrap();
        assert_eq!(first, second);
        assert!(first.ok());
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock_client() {
        let client = MockNetworkClient::failing();
        let err = client.get("https://a.example").await.unwrap_err();
        assert_eq!(err.to_string(), "Network request failed: Network error");
    }
}
