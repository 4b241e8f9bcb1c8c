use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::{
    application::services::notifier::Notifier,
    domain::{
        errors::DomainError,
        models::{DeliveryError, DeliveryLogRecord, DeliveryStatus, PostDetails},
        repositories::DeliveryLogRepository,
    },
};

pub const LOG_CATEGORY: &str = "Notifications_Post";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Payload(#[from] DomainError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("delivery log write failed: {0}")]
    Log(#[source] anyhow::Error),
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Payload(_) => "payload",
            PipelineError::Delivery(DeliveryError::Transport(_)) => "transport",
            PipelineError::Delivery(DeliveryError::Rejected { .. }) => "rejected",
            PipelineError::Delivery(DeliveryError::MalformedResponse(_)) => "malformed_response",
            PipelineError::Log(_) => "log_write",
        }
    }

    /// The message reached the recipient even though the pipeline failed.
    pub fn delivered(&self) -> bool {
        matches!(self, PipelineError::Log(_))
    }
}

/// Renders a webhook event, sends it and records the successful delivery.
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    log_repo: Arc<dyn DeliveryLogRepository>,
    recipient: String,
    sender: Option<String>,
}

impl NotificationDispatcher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        log_repo: Arc<dyn DeliveryLogRepository>,
        recipient: String,
        sender: Option<String>,
    ) -> Self {
        Self {
            notifier,
            log_repo,
            recipient,
            sender,
        }
    }

    pub async fn handle(
        &self,
        event: &Value,
        retry_count: u32,
    ) -> Result<DeliveryLogRecord, PipelineError> {
        let text = PostDetails::from_event(event)?.render();

        self.notifier.deliver(&self.recipient, &text).await?;

        let mapper = |raw: &Value| self.map_record(raw, retry_count);
        let record = self
            .log_repo
            .write(LOG_CATEGORY, event, &mapper)
            .await
            .map_err(PipelineError::Log)?;

        info!(
            post_id = %record.post_id,
            retry_count,
            "notification delivered"
        );
        Ok(record)
    }

    fn map_record(&self, event: &Value, retry_count: u32) -> Result<DeliveryLogRecord, DomainError> {
        let details = PostDetails::from_event(event)?;
        Ok(DeliveryLogRecord {
            message_content: details.render(),
            post_id: details.post_id,
            sender_number: self.sender.clone(),
            recipient_number: self.recipient.clone(),
            status: DeliveryStatus::Sent,
            retry_count,
            updated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        infrastructure::repositories::in_memory::InMemoryDeliveryLogRepository,
        test_support::{FailingLogRepository, ScriptedNotifier, post_event},
    };

    #[tokio::test]
    async fn successful_delivery_is_logged() {
        let notifier = ScriptedNotifier::always(Ok(()));
        let repo = Arc::new(InMemoryDeliveryLogRepository::new());
        let dispatcher = NotificationDispatcher::new(
            notifier.clone(),
            repo.clone(),
            "1@s.whatsapp.net".to_string(),
            Some("page-bot".to_string()),
        );

        let record = dispatcher.handle(&post_event(), 3).await.unwrap();

        assert_eq!(record.post_id, "123");
        assert_eq!(record.retry_count, 3);
        assert_eq!(record.status, DeliveryStatus::Sent);
        assert_eq!(record.sender_number.as_deref(), Some("page-bot"));
        assert_eq!(notifier.texts()[0], record.message_content);
        assert_eq!(repo.list_recent(LOG_CATEGORY, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_delivery_is_not_logged() {
        let notifier = ScriptedNotifier::always(Err(DeliveryError::Rejected {
            status: "failed".to_string(),
        }));
        let repo = Arc::new(InMemoryDeliveryLogRepository::new());
        let dispatcher =
            NotificationDispatcher::new(notifier, repo.clone(), "1".to_string(), None);

        let err = dispatcher.handle(&post_event(), 0).await.unwrap_err();

        assert_eq!(err.kind(), "rejected");
        assert!(!err.delivered());
        assert!(repo.list_recent(LOG_CATEGORY, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_never_reaches_notifier() {
        let notifier = ScriptedNotifier::always(Ok(()));
        let dispatcher = NotificationDispatcher::new(
            notifier.clone(),
            Arc::new(InMemoryDeliveryLogRepository::new()),
            "1".to_string(),
            None,
        );

        let err = dispatcher
            .handle(&json!({ "object": "page" }), 0)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "payload");
        assert_eq!(notifier.call_count(), 0);
    }

    #[tokio::test]
    async fn log_failure_after_delivery_is_reported() {
        let notifier = ScriptedNotifier::always(Ok(()));
        let dispatcher = NotificationDispatcher::new(
            notifier.clone(),
            Arc::new(FailingLogRepository),
            "1".to_string(),
            None,
        );

        let err = dispatcher.handle(&post_event(), 0).await.unwrap_err();

        assert_eq!(err.kind(), "log_write");
        assert!(err.delivered());
        assert_eq!(notifier.call_count(), 1);
    }
}
