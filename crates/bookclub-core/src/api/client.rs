use crate::error::{ApiError, ErrorPayload};
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("bookclub-admin/", env!("CARGO_PKG_VERSION"));

/// Connection settings, passed in at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Successful response with the `data` envelope removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    /// `meta` object when the server sent one next to `data`
    pub meta: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", config.timeout_secs))?;

        Ok(ApiClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        request
    }

    /// GET with query pairs, returning the unwrapped body and any `meta`.
    pub async fn get_raw(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<ApiResponse<Value>, ApiError> {
        log::debug!("GET {} {:?}", path, query);
        let request = self.build_request(Method::GET, path).query(query);
        self.send(request, path).await
    }

    pub async fn get<T>(&self, path: &str, query: &[(String, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.get_raw(path, query).await?;
        decode(response.data, path)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        log::debug!("POST {}", path);
        let request = self.build_request(Method::POST, path).json(body);
        let response = self.send(request, path).await?;
        decode(response.data, path)
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        log::debug!("DELETE {}", path);
        let request = self.build_request(Method::DELETE, path);
        Ok(self.send(request, path).await?.data)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))?;
        self.handle_response(response, endpoint).await
    }

    pub async fn handle_response(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))?;

        if status.is_success() {
            let body: Value = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).map_err(|e| convert_json_error(e, endpoint))?
            };
            return Ok(unwrap_envelope(body));
        }

        let mut payload: ErrorPayload =
            serde_json::from_str(&text).unwrap_or_else(|_| ErrorPayload {
                error: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                message: text.clone(),
                ..Default::default()
            });
        payload.status_code.get_or_insert(status.as_u16());

        log::warn!("{} answered {}: {}", endpoint, status, payload.message);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                payload,
            }),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                Err(ApiError::ServerTimeout {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    payload,
                })
            }
            _ => Err(ApiError::Server {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                payload,
            }),
        }
    }
}

/// `{ data, meta? }` becomes its parts; any other body is the data itself.
pub fn unwrap_envelope(body: Value) -> ApiResponse<Value> {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            let meta = map.remove("meta");
            let data = map.remove("data").unwrap_or(Value::Null);
            ApiResponse { data, meta }
        }
        other => ApiResponse {
            data: other,
            meta: None,
        },
    }
}

fn decode<T: DeserializeOwned>(value: Value, endpoint: &str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| convert_json_error(e, endpoint))
}
