use crate::config::HttpConfig;
use crate::feed::parser::ITEM_SELECTOR;
use crate::feed::{DomParser, FeedItem, FeedManager, ReqwestClient, XmlDomParser, XML_MIME_TYPE};
use crate::testing::run_feed_suite;
use crate::Result;
use tokio::io::AsyncReadExt;
use tracing::info;

/// How fetched or parsed items are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    SanitizedHtml,
    Json,
}

impl OutputFormat {
    pub fn from_flags(json: bool, sanitize: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if sanitize {
            OutputFormat::SanitizedHtml
        } else {
            OutputFormat::Html
        }
    }
}

/// Fetch the configured feed through its proxy
pub async fn fetch(
    manager: &FeedManager,
    http: &HttpConfig,
    format: OutputFormat,
) -> Result<String> {
    let client = ReqwestClient::new(http)?;
    let items = manager.fetch_rss(&client).await?;
    info!("Fetched {} items from {}", items.len(), manager.rss_url());

    output(manager, &items, format)
}

/// Render a feed document read from `path`, or stdin when `path` is `-`
pub async fn render(manager: &FeedManager, path: &str, format: OutputFormat) -> Result<String> {
    let content = if path == "-" {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        content
    } else {
        tokio::fs::read_to_string(path).await?
    };

    let document = XmlDomParser.parse_from_str(&content, XML_MIME_TYPE);
    let items = manager.parse_items(document.query_selector_all(ITEM_SELECTOR));

    output(manager, &items, format)
}

/// Expected feed styles as JSON, or as CSS rules
pub fn styles(manager: &FeedManager, css: bool) -> Result<String> {
    let styles = manager.verify_styling();
    if css {
        Ok(styles.stylesheet())
    } else {
        Ok(serde_json::to_string_pretty(&styles)?)
    }
}

/// Run the built-in feed checks; true when all passed
pub async fn self_test() -> bool {
    run_feed_suite().await
}

fn output(manager: &FeedManager, items: &[FeedItem], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(manager.generate_html(items)),
        OutputFormat::SanitizedHtml => Ok(manager.generate_sanitized_html(items)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_render_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "<rss><channel><item><title>From disk</title><link>https://example.com/d</link></item></channel></rss>"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let manager = FeedManager::new();
        let html = render(&manager, path, OutputFormat::Html).await.unwrap();
        assert!(html.contains(r#"<a href="https://example.com/d" target="_blank">From disk</a>"#));

        let json = render(&manager, path, OutputFormat::Json).await.unwrap();
        let items: Vec<FeedItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(items[0].title, "From disk");
        assert_eq!(items[0].pub_date, "Invalid Date");
    }

    #[tokio::test]
    async fn test_render_missing_file() {
        let result = render(&FeedManager::new(), "/nonexistent/feed.xml", OutputFormat::Html).await;
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[tokio::test]
    async fn test_render_sanitized() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "<rss><channel><item><title>Tom &amp; Jerry</title><description><![CDATA[<b>x</b><script>y()</script>]]></description></item></channel></rss>"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let manager = FeedManager::new();

        let raw = render(&manager, path, OutputFormat::Html).await.unwrap();
        assert!(raw.contains(">Tom & Jerry</a>"));
        assert!(raw.contains("<script>y()</script>..."));

        let clean = render(&manager, path, OutputFormat::SanitizedHtml)
            .await
            .unwrap();
        assert!(clean.contains(">Tom &amp; Jerry</a>"));
        assert!(clean.contains("<b>x</b>..."));
        assert!(!clean.contains("<script>"));
    }

    #[test]
    fn test_output_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Html);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::SanitizedHtml);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
    }

    #[test]
    fn test_styles_output() {
        let manager = FeedManager::new();
        let json = styles(&manager, false).unwrap();
        assert!(json.contains("\"rssSection\""));
        assert!(json.contains("\"borderLeft\""));

        let css = styles(&manager, true).unwrap();
        assert!(css.contains(".rss-item"));
    }

    #[tokio::test]
    async fn test_self_test_passes() {
        assert!(self_test().await);
    }
}
