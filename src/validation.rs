//! Field validation utilities.

use crate::types::{Error, Result};

/// Validate that a string is not empty (after trimming).
pub fn validate_non_empty(s: &str, field: &str) -> Result<()> {
    if s.trim().is_empty() {
        return Err(Error::config(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Validate that a string is an absolute http(s) URL.
pub fn validate_http_url(s: &str, field: &str) -> Result<()> {
    let url = reqwest::Url::parse(s)
        .map_err(|e| Error::config(format!("{} is not a valid URL: {}", field, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config(format!(
            "{} must use http or https, got {}",
            field, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("sk_live", "api_key").is_ok());
        assert!(validate_non_empty("", "api_key").is_err());
        assert!(validate_non_empty("   ", "api_key").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://api.trysiren.io", "base_url").is_ok());
        assert!(validate_http_url("http://127.0.0.1:8080", "base_url").is_ok());
        assert!(validate_http_url("ftp://example.com", "base_url").is_err());
        assert!(validate_http_url("not a url", "base_url").is_err());
    }
}
