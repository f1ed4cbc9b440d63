use super::parser::FeedItem;
use crate::utils::sanitize::{escape_text, sanitize_html};
use serde::Serialize;

pub const EMPTY_FEED_HTML: &str = r#"<div class="error">No RSS items found</div>"#;

const UNSAFE_LINK_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// Render items as `rss-item` blocks, or the error fragment when empty.
/// Field values are interpolated as they are; feed descriptions carry markup.
pub fn render_items(items: &[FeedItem]) -> String {
    render_with(items, |item| {
        render_item(&item.link, &item.title, &item.pub_date, &item.description)
    })
}

/// Like [`render_items`], for pages that cannot trust the feed: title, date
/// and link are escaped, the description is cleaned with ammonia, and
/// script-capable links become `#`.
///
/// Markup cut open by truncation is dropped by the cleaner, together with
/// the text after it.
pub fn render_items_sanitized(items: &[FeedItem]) -> String {
    render_with(items, |item| {
        render_item(
            &escape_text(safe_link(&item.link)),
            &escape_text(&item.title),
            &escape_text(&item.pub_date),
            &sanitize_html(&item.description),
        )
    })
}

fn render_with(items: &[FeedItem], render: impl Fn(&FeedItem) -> String) -> String {
    if items.is_empty() {
        return EMPTY_FEED_HTML.to_string();
    }

    items.iter().map(render).collect()
}

fn render_item(link: &str, title: &str, date: &str, description: &str) -> String {
    format!(
        r#"
                <div class="rss-item">
                    <h3><a href="{link}" target="_blank">{title}</a></h3>
                    <p class="rss-date">{date}</p>
                    <p class="rss-description">{description}</p>
                </div>
            "#
    )
}

fn safe_link(link: &str) -> &str {
    let lowered = link.trim_start().to_ascii_lowercase();
    if UNSAFE_LINK_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        "#"
    } else {
        link
    }
}

/// Style values the feed section is expected to carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStyles {
    pub rss_section: StyleGroup,
    pub rss_item: StyleGroup,
    pub rss_link: StyleGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<&'static str>,
}

impl StyleGroup {
    fn declarations(&self) -> String {
        [
            ("background", self.background),
            ("color", self.color),
            ("border-left", self.border_left),
        ]
        .into_iter()
        .filter_map(|(property, value)| value.map(|value| format!("{property}: {value};")))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl Default for FeedStyles {
    fn default() -> Self {
        Self {
            rss_section: StyleGroup {
                background: Some("white"),
                color: Some("#333"),
                ..StyleGroup::default()
            },
            rss_item: StyleGroup {
                background: Some("#f8f9fa"),
                border_left: Some("4px solid #7cc9d1"),
                ..StyleGroup::default()
            },
            rss_link: StyleGroup {
                color: Some("#0066cc"),
                ..StyleGroup::default()
            },
        }
    }
}

impl FeedStyles {
    /// CSS rules for the classes [`render_items`] emits
    pub fn stylesheet(&self) -> String {
        format!(
            ".rss-section {{ {} }}\n.rss-item {{ {} }}\n.rss-item a {{ {} }}\n",
            self.rss_section.declarations(),
            self.rss_item.declarations(),
            self.rss_link.declarations(),
        )
    }
}
