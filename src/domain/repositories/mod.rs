use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{errors::DomainError, models::DeliveryLogRecord};

/// Turns a raw webhook event into the record that gets persisted.
pub type LogMapper<'a> = &'a (dyn Fn(&Value) -> Result<DeliveryLogRecord, DomainError> + Send + Sync);

#[async_trait]
pub trait DeliveryLogRepository: Send + Sync {
    /// Appends one record to `category`. Records are never updated afterwards.
    async fn write(
        &self,
        category: &str,
        event: &Value,
        mapper: LogMapper<'_>,
    ) -> anyhow::Result<DeliveryLogRecord>;

    /// Newest first.
    async fn list_recent(
        &self,
        category: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<DeliveryLogRecord>>;
}
