use std::sync::Arc;

use crate::application::services::retry::{RetryCoordinator, RetryStatus};

pub struct GetRetryStatusUseCase {
    retries: Arc<RetryCoordinator>,
}

impl GetRetryStatusUseCase {
    pub fn new(retries: Arc<RetryCoordinator>) -> Self {
        Self { retries }
    }

    pub async fn execute(&self) -> RetryStatus {
        self.retries.status().await
    }
}
