use super::document::ItemNode;
use crate::config::DEFAULT_DATE_FORMAT;
use crate::utils::sanitize::truncate_with_ellipsis;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// Tag of the elements holding one feed entry each
pub const ITEM_SELECTOR: &str = "item";

pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_LINK: &str = "#";
pub const INVALID_DATE: &str = "Invalid Date";

/// A feed item after default substitution and truncation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}

/// Read the four item fields off a node, substituting defaults for anything
/// missing or empty
pub fn normalize_item<N: ItemNode + ?Sized>(
    node: &N,
    description_limit: usize,
    date_format: &str,
) -> FeedItem {
    let title = field_text(node, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let link = field_text(node, "link").unwrap_or_else(|| DEFAULT_LINK.to_string());
    let description = field_text(node, "description").unwrap_or_default();
    let pub_date = field_text(node, "pubDate").unwrap_or_default();

    FeedItem {
        title,
        link,
        description: truncate_with_ellipsis(&description, description_limit),
        pub_date: format_pub_date(&pub_date, date_format),
    }
}

fn field_text<N: ItemNode + ?Sized>(node: &N, field: &str) -> Option<String> {
    node.query_selector(field).filter(|text| !text.is_empty())
}

const WEEKDAY_PREFIXES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// `%B` also accepts abbreviated month names
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y", "%b %d %Y"];

/// Parse a feed date. RSS asks for RFC 2822 but feeds in the wild also use
/// RFC 3339, bare ISO dates and long-form month names, and often carry a
/// weekday that does not match the day. The weekday is ignored.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    let raw = strip_weekday(raw);
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date.and_utc());
        }
    }

    DATE_FORMATS
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Drop a leading weekday name (`Mon, `, `Tuesday `) if there is one
fn strip_weekday(raw: &str) -> &str {
    let end = raw
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(raw.len());
    let word = raw[..end].to_ascii_lowercase();

    if word.len() >= 3 && WEEKDAY_PREFIXES.iter().any(|day| word.starts_with(day)) {
        raw[end..].trim_start_matches(',').trim_start()
    } else {
        raw
    }
}

/// Render a feed date as a short date, or `Invalid Date` when it cannot be
/// parsed
pub fn format_pub_date(raw: &str, date_format: &str) -> String {
    let Some(date) = parse_pub_date(raw) else {
        if !raw.is_empty() {
            debug!("Unparseable pubDate: {}", raw);
        }
        return INVALID_DATE.to_string();
    };

    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(date_format)).is_err() {
        formatted.clear();
        // Only reachable with an invalid format string
        let _ = write!(formatted, "{}", date.format(DEFAULT_DATE_FORMAT));
    }
    formatted
}
