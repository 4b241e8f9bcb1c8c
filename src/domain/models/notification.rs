use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A webhook event that could not be delivered yet.
///
/// The raw payload is kept untouched so that a retry renders the message again
/// from scratch, exactly like the first attempt did.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub payload: Value,
    pub enqueued_at: DateTime<Utc>,
    /// Retry rounds this notification has already been through.
    pub attempts: u32,
}

impl Notification {
    pub fn new(payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
            enqueued_at: Utc::now(),
            attempts: 0,
        }
    }
}
