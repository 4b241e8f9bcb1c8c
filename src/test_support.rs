//! Fakes shared by the unit tests of the retry subsystem and the endpoints.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::Instant;

use crate::{
    application::services::notifier::Notifier,
    domain::{
        models::{DeliveryLogRecord, DeliveryOutcome},
        repositories::{DeliveryLogRepository, LogMapper},
    },
};

pub fn post_event() -> Value {
    json!({
        "entry": [{
            "changes": [{
                "value": {
                    "post_id": "123",
                    "created_time": "2024-01-01T00:00:00",
                    "message": "Hello",
                    "from": { "name": "Page" }
                }
            }]
        }]
    })
}

pub fn post_event_with_id(post_id: &str) -> Value {
    let mut event = post_event();
    event["entry"][0]["changes"][0]["value"]["post_id"] = json!(post_id);
    event
}

/// Replays queued outcomes in order, then falls back to `fallback`.
pub struct ScriptedNotifier {
    script: Mutex<VecDeque<DeliveryOutcome>>,
    fallback: Mutex<DeliveryOutcome>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedNotifier {
    pub fn always(outcome: DeliveryOutcome) -> Arc<Self> {
        Self::scripted(Vec::new(), outcome)
    }

    pub fn scripted(script: Vec<DeliveryOutcome>, fallback: DeliveryOutcome) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback: Mutex::new(fallback),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn set_fallback(&self, outcome: DeliveryOutcome) {
        *self.fallback.lock().unwrap() = outcome;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl Notifier for ScriptedNotifier {
    async fn deliver(&self, _recipient: &str, text: &str) -> DeliveryOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }
}

pub struct FailingLogRepository;

#[async_trait]
impl DeliveryLogRepository for FailingLogRepository {
    async fn write(
        &self,
        _category: &str,
        _event: &Value,
        _mapper: LogMapper<'_>,
    ) -> anyhow::Result<DeliveryLogRecord> {
        anyhow::bail!("database unavailable")
    }

    async fn list_recent(
        &self,
        _category: &str,
        _limit: u32,
    ) -> anyhow::Result<Vec<DeliveryLogRecord>> {
        Ok(Vec::new())
    }
}
