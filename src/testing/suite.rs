use super::mocks::{MockItem, MockNetworkClient};
use super::runner::{assert_contains, assert_equal, assert_that, TestRunner};
use crate::feed::{FeedItem, FeedManager};
use serde_json::json;

/// Single-item RSS document served by the mock proxy
pub const SAMPLE_FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
    <channel>
        <item>
            <title>Test News</title>
            <link>https://example.com/news</link>
            <description>Test news description</description>
            <pubDate>Mon, 13 Jan 2025 12:00:00 GMT</pubDate>
        </item>
    </channel>
</rss>"#;

fn rendered_item() -> FeedItem {
    FeedItem {
        title: "Test Title".to_string(),
        link: "https://example.com".to_string(),
        description: "Test description...".to_string(),
        pub_date: "1/13/2025".to_string(),
    }
}

/// Register the feed cases on a fresh runner
pub fn feed_suite() -> TestRunner {
    let mut runner = TestRunner::new();

    runner.test("FeedManager should initialize with correct URL", || async {
        let manager = FeedManager::new();
        assert_equal(manager.rss_url(), "https://distrowatch.com/news/dw.xml", None)?;
        assert_that(manager.proxy_url().contains("api.allorigins.win"), None)?;
        Ok(())
    });

    runner.test("Should parse RSS items correctly", || async {
        let manager = FeedManager::new();
        let nodes = [
            MockItem::new()
                .with_field("title", "Test Title 1")
                .with_field("link", "https://example.com/1")
                .with_field("description", "Test description 1 with some content")
                .with_field("pubDate", "Mon, 13 Jan 2025 12:00:00 GMT")
                .with_fallback(""),
            MockItem::new()
                .with_field("title", "Test Title 2")
                .with_field("link", "https://example.com/2")
                .with_field("description", "Test description 2 with different content")
                .with_field("pubDate", "Tue, 14 Jan 2025 12:00:00 GMT")
                .with_fallback(""),
        ];

        let items = manager.parse_items(&nodes);
        assert_equal(items.len(), 2, None)?;
        assert_equal(items[0].title.as_str(), "Test Title 1", None)?;
        assert_equal(items[0].link.as_str(), "https://example.com/1", None)?;
        assert_that(items[0].description.contains("Test description 1"), None)?;
        assert_that(items[0].pub_date.contains("2025"), None)?;
        Ok(())
    });

    runner.test("Should handle missing RSS item data gracefully", || async {
        let manager = FeedManager::new();
        let nodes = [MockItem::new()
            .with_field("title", "Only Title")
            .with_fallback("")];

        let items = manager.parse_items(&nodes);
        assert_equal(items.len(), 1, None)?;
        assert_equal(items[0].title.as_str(), "Only Title", None)?;
        assert_equal(items[0].link.as_str(), "#", None)?;
        assert_equal(items[0].description.as_str(), "...", None)?;
        assert_equal(items[0].pub_date.as_str(), "Invalid Date", None)?;
        Ok(())
    });

    runner.test("Should generate correct HTML from RSS items", || async {
        let html = FeedManager::new().generate_html(&[rendered_item()]);
        assert_contains(&html, "Test Title", None)?;
        assert_contains(&html, "https://example.com", None)?;
        assert_contains(&html, "Test description...", None)?;
        assert_contains(&html, "1/13/2025", None)?;
        assert_contains(&html, "rss-item", None)?;
        Ok(())
    });

    runner.test("Should generate error message for empty RSS items", || async {
        let html = FeedManager::new().generate_html(&[]);
        assert_contains(&html, "error", None)?;
        assert_contains(&html, "No RSS items found", None)?;
        Ok(())
    });

    runner.test("Should limit RSS items to 5 maximum", || async {
        let manager = FeedManager::new();
        let nodes: Vec<MockItem> = (1..=10)
            .map(|index| MockItem::uniform(format!("Item {index}")))
            .collect();

        let items = manager.parse_items(&nodes);
        assert_equal(items.len(), 5, None)?;
        Ok(())
    });

    runner.test("Should truncate descriptions to 200 characters", || async {
        let manager = FeedManager::new();
        let nodes = [MockItem::uniform("Test").with_field("description", "a".repeat(300))];

        let items = manager.parse_items(&nodes);
        assert_that(items[0].description.chars().count() <= 203, None)?;
        assert_that(items[0].description.ends_with("..."), None)?;
        Ok(())
    });

    runner.test("Should fetch RSS data successfully", || async {
        let manager = FeedManager::new();
        let client = MockNetworkClient::new(json!({ "contents": SAMPLE_FEED_XML }));

        let items = manager.fetch_rss(&client).await?;
        assert_that(!items.is_empty(), None)?;
        assert_equal(items[0].title.as_str(), "Test News", None)?;
        Ok(())
    });

    runner.test("Should handle RSS fetch failure gracefully", || async {
        let manager = FeedManager::new();
        let client = MockNetworkClient::failing();

        match manager.fetch_rss(&client).await {
            Ok(_) => assert_that(false, Some("Should have thrown an error"))?,
            Err(e) => assert_that(e.to_string().contains("Network error"), None)?,
        }
        Ok(())
    });

    runner.test("Should format dates correctly", || async {
        let manager = FeedManager::new();
        let nodes = [MockItem::uniform("Mon, 13 Jan 2025 12:00:00 GMT")];

        let items = manager.parse_items(&nodes);
        assert_that(items[0].pub_date.contains("2025"), None)?;
        assert_that(items[0].pub_date.contains('1'), None)?;
        assert_that(items[0].pub_date.contains("13"), None)?;
        Ok(())
    });

    runner.test("Should verify correct CSS styling for RSS feed", || async {
        let styles = FeedManager::new().verify_styling();

        assert_equal(styles.rss_section.background, Some("white"), None)?;
        assert_equal(styles.rss_section.color, Some("#333"), None)?;
        assert_equal(styles.rss_item.background, Some("#f8f9fa"), None)?;
        assert_contains(styles.rss_item.border_left.unwrap_or_default(), "#7cc9d1", None)?;
        assert_equal(styles.rss_link.color, Some("#0066cc"), None)?;
        Ok(())
    });

    runner.test(
        "Should generate HTML with correct CSS classes for white background",
        || async {
            let html = FeedManager::new().generate_html(&[rendered_item()]);

            assert_contains(&html, r#"class="rss-item""#, None)?;
            assert_contains(&html, r#"class="rss-date""#, None)?;
            assert_contains(&html, r#"class="rss-description""#, None)?;
            assert_contains(&html, "<h3><a href=", None)?;
            assert_contains(&html, r#"target="_blank""#, None)?;
            Ok(())
        },
    );

    runner
}

/// Run the feed cases and report whether all passed
pub async fn run_feed_suite() -> bool {
    feed_suite().run().await
}
