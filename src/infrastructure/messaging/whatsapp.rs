use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    application::services::notifier::Notifier,
    domain::models::{DeliveryError, DeliveryOutcome},
};

/// Client for the local WhatsApp manager that owns the actual session.
pub struct WhatsAppManagerClient {
    http: Client,
    url: String,
}

impl WhatsAppManagerClient {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Arc<dyn Notifier>> {
        let mut builder = Client::builder().user_agent("post-relay/whatsapp");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Arc::new(Self {
            http: builder.build()?,
            url: url.into(),
        }) as Arc<dyn Notifier>)
    }
}

#[async_trait]
impl Notifier for WhatsAppManagerClient {
    async fn deliver(&self, recipient: &str, text: &str) -> DeliveryOutcome {
        debug!(recipient, url = %self.url, "sending message to whatsapp manager");

        let response = self
            .http
            .post(&self.url)
            .json(&SendMessageRequest {
                recipient_number: recipient,
                text,
            })
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: format!("http {}", status.as_u16()),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        interpret_response(&body)
    }
}

/// Only a JSON body whose `status` is exactly `"sent"` counts as delivered.
fn interpret_response(body: &[u8]) -> DeliveryOutcome {
    let payload: SendMessageResponse = serde_json::from_slice(body)
        .map_err(|err| DeliveryError::MalformedResponse(err.to_string()))?;

    match payload.status.as_deref() {
        Some("sent") => Ok(()),
        Some(other) => Err(DeliveryError::Rejected {
            status: other.to_string(),
        }),
        None => Err(DeliveryError::MalformedResponse(
            "missing `status` field".to_string(),
        )),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    recipient_number: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    status: Option<String>,
}
