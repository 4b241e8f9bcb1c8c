use crate::{
    application::services::retry::RetryStatus,
    domain::models::{DeliveryLogRecord, Notification},
    presentation::http::responses::{
        DeliveryLogRecordDto, PendingNotificationDto, RetryStatusDto,
    },
};

pub fn map_record(record: &DeliveryLogRecord) -> DeliveryLogRecordDto {
    DeliveryLogRecordDto {
        post_id: record.post_id.clone(),
        sender_number: record.sender_number.clone(),
        recipient_number: record.recipient_number.clone(),
        message_content: record.message_content.clone(),
        status: record.status.into(),
        retry_count: record.retry_count,
        updated_at: record.updated_at.to_rfc3339(),
    }
}

pub fn map_retry_status(status: &RetryStatus) -> RetryStatusDto {
    RetryStatusDto {
        state: status.state.into(),
        budget: status.budget.into(),
        completed_rounds: status.completed_rounds,
        max_rounds: status.max_rounds,
        pending: status.pending.iter().map(map_pending).collect(),
        abandoned: status.abandoned as u32,
    }
}

fn map_pending(notification: &Notification) -> PendingNotificationDto {
    PendingNotificationDto {
        id: notification.id,
        enqueued_at: notification.enqueued_at.to_rfc3339(),
        attempts: notification.attempts,
    }
}
