use super::traits::{CreateService, DeleteService};
use super::types::Resource;
use crate::api::client::{ApiClient, ApiResponse};
use crate::api::models::ListMeta;
use crate::datatable::{Cursor, Page, PageFetcher, QueryState};
use crate::error::ApiError;
use crate::utils::error_helpers::convert_json_error;
use crate::utils::retry::{RetryConfig, RetryExecutor};
use async_trait::async_trait;
use serde_json::Value;

/// List, create and delete operations on one catalog resource.
#[derive(Debug, Clone)]
pub struct ResourceService {
    client: ApiClient,
    resource: Resource,
}

impl ResourceService {
    pub fn new(client: ApiClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub async fn list_page(&self, query: &QueryState) -> Result<Page<Value>, ApiError> {
        let path = self.resource.path();
        let response = self.client.get_raw(&path, &query.to_query_pairs()).await?;
        parse_page(response, &path)
    }
}

/// Split a list response into rows and pagination metadata.
pub fn parse_page(response: ApiResponse<Value>, endpoint: &str) -> Result<Page<Value>, ApiError> {
    let rows = match response.data {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => {
            return Err(convert_json_error(
                format!("expected a list of rows, got {}", kind_of(&other)),
                endpoint,
            ));
        }
    };

    let meta: ListMeta = match response.meta {
        Some(meta) => serde_json::from_value(meta).map_err(|e| convert_json_error(e, endpoint))?,
        None => ListMeta::default(),
    };

    Ok(Page {
        rows,
        total: meta.total,
        next: meta.next.as_ref().and_then(Cursor::from_json),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl PageFetcher<Value> for ResourceService {
    async fn fetch_page(&self, query: &QueryState) -> Result<Page<Value>, ApiError> {
        self.list_page(query).await
    }
}

#[async_trait]
impl CreateService for ResourceService {
    async fn create(&self, input: &Value) -> Result<Value, ApiError> {
        self.client.post(&self.resource.path(), input).await
    }
}

#[async_trait]
impl DeleteService for ResourceService {
    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete(&self.resource.item_path(id)).await?;
        Ok(())
    }
}

/// Page fetcher that retries transient failures with exponential backoff.
/// Page reads are idempotent, so re-issuing one is safe.
pub struct RetryingFetcher<F> {
    inner: F,
    executor: RetryExecutor,
}

impl<F> RetryingFetcher<F> {
    pub fn new(inner: F, config: RetryConfig) -> Self {
        Self {
            inner,
            executor: RetryExecutor::new(config),
        }
    }
}

#[async_trait]
impl<T, F> PageFetcher<T> for RetryingFetcher<F>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    async fn fetch_page(&self, query: &QueryState) -> Result<Page<T>, ApiError> {
        self.executor
            .execute(|| self.inner.fetch_page(query))
            .await
    }
}
