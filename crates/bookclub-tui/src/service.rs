//! Connection to the catalog API, shared across background tasks.

use std::sync::Arc;

use bookclub_core::actions::{Notification, delete_book};
use bookclub_core::api::client::{ApiClient, ClientConfig};
use bookclub_core::core::services::resource_service::{ResourceService, RetryingFetcher};
use bookclub_core::core::services::types::Resource;
use bookclub_core::datatable::{Page, PageFetcher, QueryState};
use bookclub_core::error::ApiError;
use bookclub_core::storage::config::Config;
use bookclub_core::storage::credentials::get_api_token;
use bookclub_core::utils::retry::RetryConfig;
use bookclub_core::utils::validation::validate_url;
use serde_json::Value;

use crate::error::{TuiError, TuiResult};

pub struct ServiceClient {
    client: ApiClient,
    base_url: String,
    authenticated: bool,
}

impl ServiceClient {
    pub fn new(base_url: String, token: Option<String>) -> TuiResult<Self> {
        validate_url(&base_url)?;
        let authenticated = token.is_some();
        let mut config = ClientConfig::new(base_url.clone());
        if let Some(token) = token {
            config = config.with_token(token);
        }
        Ok(Self {
            client: ApiClient::new(config)?,
            base_url,
            authenticated,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn resource_service(&self, resource: Resource) -> ResourceService {
        ResourceService::new(self.client.clone(), resource)
    }

    /// One page for `resource`, retrying transient failures.
    pub async fn fetch_page(
        &self,
        resource: Resource,
        query: &QueryState,
    ) -> Result<Page<Value>, ApiError> {
        RetryingFetcher::new(self.resource_service(resource), RetryConfig::quick())
            .fetch_page(query)
            .await
    }

    pub async fn delete_book(&self, id: u64) -> Notification {
        delete_book(&self.resource_service(Resource::Books), id).await
    }
}

/// Build the shared client from the config file and environment.
pub fn init_service(config: &Config) -> TuiResult<Arc<ServiceClient>> {
    let base_url = config.resolve_url(None).ok_or_else(|| {
        TuiError::Config(
            "Catalog API URL is not configured. Run 'bookclub config set --url <url>' or set BOOKCLUB_API_URL".to_string(),
        )
    })?;
    ServiceClient::new(base_url, get_api_token()).map(Arc::new)
}

/// Connection indicator in the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionStatus {
    /// No token; reads may still work against an open server.
    #[default]
    Anonymous,
    Authenticated,
    Error(String),
}
