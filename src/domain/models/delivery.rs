use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a single delivery attempt toward the messenger did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("messenger answered with status `{status}`")]
    Rejected { status: String },
    #[error("malformed messenger response: {0}")]
    MalformedResponse(String),
}

pub type DeliveryOutcome = Result<(), DeliveryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "sent" => Some(DeliveryStatus::Sent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryLogRecord {
    pub post_id: String,
    pub sender_number: Option<String>,
    pub recipient_number: String,
    pub message_content: String,
    pub status: DeliveryStatus,
    pub retry_count: u32,
    pub updated_at: DateTime<Utc>,
}
