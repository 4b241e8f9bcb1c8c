use async_trait::async_trait;

use crate::domain::models::DeliveryOutcome;

/// One-shot delivery of a text message to a recipient.
///
/// Implementations never retry on their own and never panic; every failure
/// mode is reported through [`DeliveryOutcome`].
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, recipient: &str, text: &str) -> DeliveryOutcome;
}
