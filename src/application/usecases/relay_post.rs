use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::{
    application::{
        handlers::notification_dispatcher::{NotificationDispatcher, PipelineError},
        services::retry::RetryCoordinator,
    },
    domain::models::DeliveryLogRecord,
};

/// Delivers a freshly received Page event, handing it to the retry queue on
/// any failure.
pub struct RelayPostUseCase {
    dispatcher: Arc<NotificationDispatcher>,
    retries: Arc<RetryCoordinator>,
}

impl RelayPostUseCase {
    pub fn new(dispatcher: Arc<NotificationDispatcher>, retries: Arc<RetryCoordinator>) -> Self {
        Self {
            dispatcher,
            retries,
        }
    }

    pub async fn execute(&self, event: Value) -> Result<DeliveryLogRecord, PipelineError> {
        let retry_count = self.retries.intake_retry_count().await;

        match self.dispatcher.handle(&event, retry_count).await {
            Ok(record) => Ok(record),
            Err(err) => {
                // A failed log write still re-queues, so the post may be sent twice.
                error!(kind = err.kind(), error = %err, "failed to relay post");
                self.retries.enqueue(event).await;
                Err(err)
            }
        }
    }
}
