//! Bearer token lookup
//!
//! The token is read from the BOOKCLUB_API_TOKEN environment variable and
//! handed to the client explicitly; nothing is persisted.

use std::env;

pub const TOKEN_ENV: &str = "BOOKCLUB_API_TOKEN";

/// Get the API token from the environment, ignoring empty values
pub fn get_api_token() -> Option<String> {
    env::var(TOKEN_ENV).ok().filter(|k| !k.is_empty())
}

pub fn has_api_token() -> bool {
    get_api_token().is_some()
}

/// Flag value wins over the environment.
pub fn resolve_token(flag: Option<String>) -> Option<String> {
    flag.filter(|t| !t.is_empty()).or_else(get_api_token)
}
