use std::sync::Arc;

use crate::{
    application::handlers::notification_dispatcher::LOG_CATEGORY,
    domain::{models::DeliveryLogRecord, repositories::DeliveryLogRepository},
};

pub struct ListDeliveryLogUseCase {
    repo: Arc<dyn DeliveryLogRepository>,
}

impl ListDeliveryLogUseCase {
    pub fn new(repo: Arc<dyn DeliveryLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, limit: Option<u32>) -> anyhow::Result<Vec<DeliveryLogRecord>> {
        let limit = limit.unwrap_or(50).clamp(1, 200);
        self.repo.list_recent(LOG_CATEGORY, limit).await
    }
}
