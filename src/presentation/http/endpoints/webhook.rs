use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::Query,
    payload::{Binary, PlainText},
};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    application::usecases::verify_subscription::{VerificationOutcome, VerifySubscriptionRequest},
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        responses::{VerificationResponse, WebhookEventResponse},
    },
};

#[derive(Clone)]
pub struct WebhookEndpoints {
    state: Arc<ApiState>,
}

impl WebhookEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl WebhookEndpoints {
    /// Subscription handshake performed by Facebook when the webhook is registered.
    #[oai(path = "/facebook-posts", method = "get", tag = EndpointsTags::Webhook)]
    pub async fn verify(
        &self,
        #[oai(name = "hub.mode")] mode: Query<Option<String>>,
        #[oai(name = "hub.verify_token")] verify_token: Query<Option<String>>,
        #[oai(name = "hub.challenge")] challenge: Query<Option<String>>,
    ) -> VerificationResponse {
        let outcome = self
            .state
            .verify_subscription_usecase
            .execute(VerifySubscriptionRequest {
                mode: mode.0.as_deref(),
                verify_token: verify_token.0.as_deref(),
                challenge: challenge.0.as_deref(),
            });

        match outcome {
            VerificationOutcome::Verified(challenge) => {
                info!("webhook verified");
                VerificationResponse::Verified(PlainText(challenge))
            }
            VerificationOutcome::Rejected => {
                warn!("webhook verification rejected");
                VerificationResponse::Forbidden
            }
            VerificationOutcome::Ignored => VerificationResponse::Ignored,
        }
    }

    /// Page feed change notification. Any body is accepted; one that is not
    /// JSON still goes through the pipeline and ends up queued.
    #[oai(path = "/facebook-posts", method = "post", tag = EndpointsTags::Webhook)]
    pub async fn receive(&self, body: Binary<Vec<u8>>) -> WebhookEventResponse {
        match self.state.relay_post_usecase.execute(decode_event(&body.0)).await {
            Ok(_) => WebhookEventResponse::Delivered,
            Err(_) => WebhookEventResponse::Queued,
        }
    }
}

/// Non-JSON bodies are kept as their raw text.
fn decode_event(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!(error = %err, "webhook body is not JSON");
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}
