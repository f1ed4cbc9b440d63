// Text helpers for feed content

/// Clean feed-supplied markup with ammonia's default allowlist
pub fn sanitize_html(text: &str) -> String {
    ammonia::clean(text)
}

/// Escape text for use in element content or a double-quoted attribute.
/// Unlike a strict escaper, `/` is kept so links render as written.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keep the first `max_chars` characters and always append `...`
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
