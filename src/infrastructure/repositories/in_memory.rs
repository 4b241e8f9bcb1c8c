use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::{
    models::DeliveryLogRecord,
    repositories::{DeliveryLogRepository, LogMapper},
};

#[derive(Default)]
pub struct InMemoryDeliveryLogRepository {
    records: Arc<RwLock<HashMap<String, Vec<DeliveryLogRecord>>>>,
}

impl InMemoryDeliveryLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryLogRepository for InMemoryDeliveryLogRepository {
    async fn write(
        &self,
        category: &str,
        event: &Value,
        mapper: LogMapper<'_>,
    ) -> anyhow::Result<DeliveryLogRecord> {
        let record = mapper(event)?;
        let mut records = self.records.write().await;
        records
            .entry(category.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_recent(
        &self,
        category: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<DeliveryLogRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(category)
            .map(|entries| {
                entries
                    .iter()
                    .rev()
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::{errors::DomainError, models::DeliveryStatus};

    fn record(post_id: &str) -> DeliveryLogRecord {
        DeliveryLogRecord {
            post_id: post_id.to_string(),
            sender_number: None,
            recipient_number: "1@s.whatsapp.net".to_string(),
            message_content: "text".to_string(),
            status: DeliveryStatus::Sent,
            retry_count: 0,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lists_newest_first_per_category() {
        let repo = InMemoryDeliveryLogRepository::new();
        for id in ["1", "2", "3"] {
            let mapper = move |_: &Value| Ok::<_, DomainError>(record(id));
            repo.write("Notifications_Post", &json!({}), &mapper)
                .await
                .unwrap();
        }
        let other = |_: &Value| Ok::<_, DomainError>(record("x"));
        repo.write("Other", &json!({}), &other)
            .await
            .unwrap();

        let listed = repo.list_recent("Notifications_Post", 2).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| r.post_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[tokio::test]
    async fn mapper_failure_writes_nothing() {
        let repo = InMemoryDeliveryLogRepository::new();
        let mapper =
            |_: &Value| Err::<DeliveryLogRecord, _>(DomainError::InvalidPayload("nope".to_string()));
        assert!(
            repo.write("Notifications_Post", &json!({}), &mapper)
                .await
                .is_err()
        );
        assert!(
            repo.list_recent("Notifications_Post", 10)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
