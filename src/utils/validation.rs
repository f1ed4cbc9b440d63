// Validation utilities
use crate::error::{Error, Result};
use tracing::warn;
use url::Url;

/// Validate a URL is valid, uses http/https scheme and names a host
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    // Check scheme
    match url.scheme() {
        "http" | "https" => {}
        _ => {
            warn!(
                "Blocked non-HTTP(S) URL scheme: {} in URL: {}",
                url.scheme(),
                url_str
            );
            return Err(Error::Config(format!(
                "URL must use http or https scheme: {url_str}"
            )));
        }
    }

    // Check for host
    if !url.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(Error::Config("URL must have a valid host".to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        // Valid URLs
        assert!(validate_url("https://distrowatch.com/news/dw.xml").is_ok());
        assert!(validate_url("https://api.allorigins.win/get?url=").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/get?url=").is_ok());

        // Invalid schemes
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("not-a-url").is_err());
    }
}
