use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{title} {message}")]
    ActionFailed { title: String, message: String },
}

/// Structured error body returned by the catalog API on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("Authentication failed: {status} {}", .payload.message)]
    Unauthorized {
        status: u16,
        endpoint: String,
        payload: ErrorPayload,
    },
    /// 408 or 504 from the server, as opposed to the client giving up.
    #[error("Server timed out: {status} {}", .payload.message)]
    ServerTimeout {
        status: u16,
        endpoint: String,
        payload: ErrorPayload,
    },
    #[error("HTTP error: {status} {}", .payload.message)]
    Server {
        status: u16,
        endpoint: String,
        payload: ErrorPayload,
    },
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// HTTP status when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::ServerTimeout { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured body of a non-2xx answer.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            ApiError::Unauthorized { payload, .. }
            | ApiError::ServerTimeout { payload, .. }
            | ApiError::Server { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            other => match other.payload() {
                Some(payload) if !payload.message.is_empty() => payload.message.clone(),
                _ => other.to_string(),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Table formatting failed: {0}")]
    TableFormat(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// A row did not conform to the shape an action requires.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Row does not match the {schema} schema: {message}")]
    Schema { schema: String, message: String },
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Column '{0}' cannot be sorted")]
    NotSortable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. }
                | ApiError::ServerTimeout { .. }
                | ApiError::Transport { .. } => ErrorSeverity::Medium,
                ApiError::Server { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
            AppError::Validation(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(api_error) if api_error.payload().is_some() => api_error.user_message(),
            AppError::Config(ConfigError::MissingField { field, .. }) => {
                format!("{} is not configured", field)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Unauthorized { .. }) | AppError::Cli(CliError::AuthRequired { .. }) => {
                Some("Set BOOKCLUB_API_TOKEN or pass --token".to_string())
            }
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Api(
                ApiError::Timeout { .. } | ApiError::ServerTimeout { .. } | ApiError::Transport { .. },
            ) => {
                Some("Check your connection to the catalog API and try again".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("invalid arguments".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: invalid arguments"
        );
    }

    #[test]
    fn test_error_payload_keeps_extra_fields() {
        let json = r#"{
            "error": "Bad Request",
            "message": "title is required",
            "statusCode": 400,
            "field": "title"
        }"#;
        let payload: ErrorPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.error, "Bad Request");
        assert_eq!(payload.message, "title is required");
        assert_eq!(payload.status_code, Some(400));
        assert_eq!(payload.extra.get("field"), Some(&Value::from("title")));
    }

    #[test]
    fn test_error_payload_tolerates_partial_body() {
        let payload: ErrorPayload = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(payload.error, "");
        assert_eq!(payload.status_code, None);
    }

    #[test]
    fn test_api_error_display() {
        let api_err = ApiError::Server {
            status: 422,
            endpoint: "/books".to_string(),
            payload: ErrorPayload {
                message: "invalid".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(format!("{}", api_err), "HTTP error: 422 invalid");
        assert_eq!(api_err.status(), Some(422));
        assert_eq!(api_err.user_message(), "invalid");

        let api_err = ApiError::Timeout {
            timeout_secs: 10,
            endpoint: "/books".to_string(),
        };
        assert!(matches!(api_err, ApiError::Timeout { .. }));
        assert_eq!(api_err.status(), None);
    }

    #[test]
    fn test_app_error_severity() {
        let app_err = AppError::Api(ApiError::Unauthorized {
            status: 401,
            endpoint: "/books".to_string(),
            payload: ErrorPayload {
                message: "bad token".to_string(),
                ..Default::default()
            },
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert!(app_err.troubleshooting_hint().is_some());

        let app_err = AppError::Api(ApiError::Server {
            status: 503,
            endpoint: "/books".to_string(),
            payload: ErrorPayload::default(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Validation(ValidationError::NotSortable("author".to_string()));
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            format!("{}", app_err),
            "ValidationError: Column 'author' cannot be sorted"
        );
    }

    #[test]
    fn test_display_friendly_prefers_server_message() {
        let app_err = AppError::Api(ApiError::Server {
            status: 400,
            endpoint: "/books".to_string(),
            payload: ErrorPayload {
                error: "Bad Request".to_string(),
                message: "size must be positive".to_string(),
                status_code: Some(400),
                extra: Map::new(),
            },
        });
        assert_eq!(app_err.display_friendly(), "size must be positive");
    }

    #[test]
    fn test_server_timeout_keeps_payload() {
        let app_err = AppError::Api(ApiError::ServerTimeout {
            status: 504,
            endpoint: "/books".to_string(),
            payload: ErrorPayload {
                message: "upstream catalog down".to_string(),
                ..Default::default()
            },
        });
        assert_eq!(app_err.display_friendly(), "upstream catalog down");
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);
        assert!(app_err.troubleshooting_hint().is_some());
    }

    #[test]
    fn test_missing_config_field_carries_hint() {
        let app_err = AppError::Config(ConfigError::MissingField {
            field: "Catalog API URL".to_string(),
            hint: "set BOOKCLUB_API_URL".to_string(),
        });
        assert_eq!(app_err.display_friendly(), "Catalog API URL is not configured");
        assert_eq!(
            app_err.troubleshooting_hint().as_deref(),
            Some("set BOOKCLUB_API_URL")
        );
        assert_eq!(app_err.severity(), ErrorSeverity::High);
    }
}
