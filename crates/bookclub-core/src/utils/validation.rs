//! Input validation for configuration values and API parameters.

use crate::error::{CliError, ConfigError};

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate bearer token format
pub fn validate_token(token: &str) -> crate::Result<()> {
    if token.trim().is_empty() {
        return Err(CliError::InvalidArguments("API token cannot be empty".to_string()).into());
    }

    if token.chars().any(char::is_whitespace) {
        return Err(
            CliError::InvalidArguments("API token must not contain whitespace".to_string()).into(),
        );
    }

    Ok(())
}

/// Validate a page size coming from flags or the config file
pub fn validate_page_size(size: u32) -> crate::Result<std::num::NonZeroU32> {
    std::num::NonZeroU32::new(size).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: "page_size".to_string(),
            value: size.to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("https://api.bookclub.example").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:3000").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("abc.def.ghi").is_ok());
        assert!(validate_token("").is_err());
        assert!(validate_token("   ").is_err());
        assert!(validate_token("has space").is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert_eq!(validate_page_size(15).unwrap().get(), 15);
        assert!(validate_page_size(0).is_err());
    }
}
