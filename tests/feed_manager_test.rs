use async_trait::async_trait;
use newsfeed::feed::{
    DomParser, FeedManager, NetworkClient, ProxyResponse, XmlDocument, XmlDomParser, XmlElement,
    XML_MIME_TYPE,
};
use newsfeed::testing::MockNetworkClient;
use newsfeed::Error;
use serde_json::json;
use std::sync::Mutex;

const DW_NEWS: &str = include_str!("fixtures/dw_news.xml");

struct StaticClient(ProxyResponse);

#[async_trait]
impl NetworkClient for StaticClient {
    async fn get(&self, _url: &str) -> newsfeed::Result<ProxyResponse> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingParser {
    seen: Mutex<Vec<(String, String)>>,
}

impl DomParser for RecordingParser {
    fn parse_from_str(&self, text: &str, mime_type: &str) -> XmlDocument {
        self.seen
            .lock()
            .unwrap()
            .push((text.to_string(), mime_type.to_string()));
        XmlDocument::new(
            XmlElement::new("rss").with_child(
                XmlElement::new("item").with_child(XmlElement::new("title").with_text("Injected")),
            ),
        )
    }
}

#[test]
fn test_parse_fixture_document() {
    let document = XmlDomParser.parse_from_str(DW_NEWS, XML_MIME_TYPE);
    let nodes = document.query_selector_all("item");
    assert_eq!(nodes.len(), 7);

    let items = FeedManager::new().parse_items(nodes);
    assert_eq!(items.len(), 5);

    assert_eq!(items[0].title, "Distribution Release: Fedora 41");
    assert_eq!(items[0].link, "https://distrowatch.com/12001");
    assert_eq!(items[0].pub_date, "10/29/2024");
    assert!(items[0].description.contains("<b>Fedora 41</b>"));

    // Long descriptions are cut to 200 characters plus the ellipsis
    assert_eq!(items[1].description.chars().count(), 203);
    assert!(items[1].description.starts_with("This week in DistroWatch Weekly"));

    assert_eq!(items[2].pub_date, "Invalid Date");
    assert_eq!(items[3].link, "#");

    assert_eq!(items[4].title, "No title");
    assert_eq!(items[4].description, "...");
    assert_eq!(items[4].pub_date, "10/9/2024");
}

#[tokio::test]
async fn test_fetch_and_render_fixture() {
    let manager = FeedManager::new();
    let client = MockNetworkClient::new(json!({ "contents": DW_NEWS }));

    let items = manager.fetch_rss(&client).await.unwrap();
    assert_eq!(items.len(), 5);

    let html = manager.generate_html(&items);
    assert_eq!(html.matches(r#"<div class="rss-item">"#).count(), 5);
    assert!(html.contains(
        r#"<h3><a href="https://distrowatch.com/12001" target="_blank">Distribution Release: Fedora 41</a></h3>"#
    ));
    assert!(html.contains(r#"<p class="rss-date">10/29/2024</p>"#));
    assert!(html.contains("Linux Mint 22.1 & LMDE."));
    assert!(!html.contains("Kali Linux 2024.3"));
}

#[tokio::test]
async fn test_markup_cut_by_truncation_keeps_ellipsis() {
    let description = format!(
        r#"<a href="https://distrowatch.com/xyz">Ubuntu</a> is out, see {}<a href="https://distrowatch.com/12010">the notes</a>"#,
        "x".repeat(116)
    );
    let feed = format!(
        "<rss><channel><item><title>Cut</title><description><![CDATA[{description}]]></description><pubDate>Mon, 14 Jan 2025 12:00:00 GMT</pubDate></item></channel></rss>"
    );
    let manager = FeedManager::new();
    let client = MockNetworkClient::new(json!({ "contents": feed }));

    let items = manager.fetch_rss(&client).await.unwrap();
    let expected: String = description.chars().take(200).collect::<String>() + "...";
    assert_eq!(items[0].description, expected);
    assert!(expected.ends_with(r#"<a href="https://distro..."#));
    assert_eq!(items[0].pub_date, "1/14/2025");

    let html = manager.generate_html(&items);
    assert!(html.contains(&format!(r#"<p class="rss-description">{expected}</p>"#)));
}

#[tokio::test]
async fn test_malformed_document_renders_error() {
    let manager = FeedManager::new();
    let client = MockNetworkClient::new(json!({ "contents": "<rss><channel><item>" }));

    let items = manager.fetch_rss(&client).await.unwrap();
    assert!(items.is_empty());
    assert!(manager
        .generate_html(&items)
        .contains(r#"<div class="error">No RSS items found</div>"#));
}

#[tokio::test]
async fn test_missing_contents_yields_no_items() {
    let manager = FeedManager::new();

    let client = MockNetworkClient::new(json!({}));
    assert!(manager.fetch_rss(&client).await.unwrap().is_empty());

    let client = MockNetworkClient::new(json!({ "contents": null }));
    assert!(manager.fetch_rss(&client).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let client = StaticClient(ProxyResponse::new(200, "<html>rate limited</html>"));
    let err = FeedManager::new().fetch_rss(&client).await.unwrap_err();
    assert!(matches!(err, Error::Envelope(_)));
}

#[tokio::test]
async fn test_error_status_is_network_failure() {
    let client = StaticClient(ProxyResponse::new(503, "unavailable"));
    let err = FeedManager::new().fetch_rss(&client).await.unwrap_err();
    assert!(matches!(err, Error::Network(ref msg) if msg == "HTTP 503"));
}

#[tokio::test]
async fn test_fetch_failure_is_not_retried() {
    let manager = FeedManager::new();
    let client = MockNetworkClient::failing();

    let err = manager.fetch_rss(&client).await.unwrap_err();
    assert!(err.to_string().contains("Network error"));
    assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn test_injected_parser_receives_contents_as_xml() {
    let manager = FeedManager::new();
    let client = MockNetworkClient::new(json!({ "contents": "<anything/>" }));
    let parser = RecordingParser::default();

    let items = manager.fetch_rss_with(&client, &parser).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Injected");
    assert_eq!(
        *parser.seen.lock().unwrap(),
        [("<anything/>".to_string(), "text/xml".to_string())]
    );
}

#[tokio::test]
async fn test_dyn_client_is_accepted() {
    let client: Box<dyn NetworkClient> = Box::new(MockNetworkClient::new(json!({
        "contents": "<rss><channel><item><title>Boxed</title></item></channel></rss>"
    })));

    let items = FeedManager::new().fetch_rss(client.as_ref()).await.unwrap();
    assert_eq!(items[0].title, "Boxed");
}
