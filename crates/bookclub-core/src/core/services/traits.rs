use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// Services that can create resources
#[async_trait]
pub trait CreateService: Send + Sync {
    async fn create(&self, input: &Value) -> Result<Value, ApiError>;
}

/// Services that can delete resources by id
#[async_trait]
pub trait DeleteService: Send + Sync {
    async fn delete(&self, id: u64) -> Result<(), ApiError>;
}
