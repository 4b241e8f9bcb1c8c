use poem_openapi::{ApiResponse, Object, payload::PlainText};
use uuid::Uuid;

use crate::presentation::models::{DeliveryStatusKind, RetryBudgetKind, SchedulerStateKind};

#[derive(ApiResponse)]
pub enum VerificationResponse {
    /// Subscription confirmed, body is the echoed challenge.
    #[oai(status = 200)]
    Verified(PlainText<String>),
    #[oai(status = 403)]
    Forbidden,
    /// Not a verification request.
    #[oai(status = 204)]
    Ignored,
}

#[derive(ApiResponse)]
pub enum WebhookEventResponse {
    /// Delivered and logged.
    #[oai(status = 200)]
    Delivered,
    /// Not delivered; the event waits in the retry queue.
    #[oai(status = 500)]
    Queued,
}

#[derive(Object)]
pub struct DeliveryLogRecordDto {
    pub post_id: String,
    pub sender_number: Option<String>,
    pub recipient_number: String,
    pub message_content: String,
    pub status: DeliveryStatusKind,
    pub retry_count: u32,
    pub updated_at: String,
}

#[derive(Object)]
pub struct PendingNotificationDto {
    pub id: Uuid,
    pub enqueued_at: String,
    pub attempts: u32,
}

#[derive(Object)]
pub struct RetryStatusDto {
    pub state: SchedulerStateKind,
    pub budget: RetryBudgetKind,
    pub completed_rounds: u32,
    pub max_rounds: u32,
    pub pending: Vec<PendingNotificationDto>,
    pub abandoned: u32,
}
