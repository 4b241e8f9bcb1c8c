use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::{sync::Mutex, time::sleep};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{RetryBudget, RetryConfig, RetryQueue, RetryScheduler, SchedulerState};
use crate::{
    application::handlers::notification_dispatcher::NotificationDispatcher,
    domain::models::Notification,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub delivered: usize,
    pub failed: usize,
    /// Every notification the round tried, delivered or not.
    pub attempted: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct RetryStatus {
    pub state: SchedulerState,
    pub budget: RetryBudget,
    pub completed_rounds: u32,
    pub max_rounds: u32,
    pub pending: Vec<Notification>,
    pub abandoned: usize,
}

struct RetryInner {
    queue: RetryQueue,
    scheduler: RetryScheduler,
    abandoned: Vec<Notification>,
}

/// Owns the retry queue and its scheduler. Enqueue and drain are the only
/// mutation points; a single timer task runs the rounds while any are due.
pub struct RetryCoordinator {
    inner: Mutex<RetryInner>,
    dispatcher: Arc<NotificationDispatcher>,
    config: RetryConfig,
}

impl RetryCoordinator {
    pub fn new(dispatcher: Arc<NotificationDispatcher>, config: RetryConfig) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(RetryInner {
                queue: RetryQueue::new(),
                scheduler: RetryScheduler::new(config.clone()),
                abandoned: Vec::new(),
            }),
            dispatcher,
            config,
        })
    }

    pub async fn enqueue(self: &Arc<Self>, payload: Value) -> Uuid {
        let mut inner = self.inner.lock().await;
        let id = inner.queue.push(Notification::new(payload));
        let pending = inner.queue.len();

        match inner.scheduler.on_enqueue() {
            Some(delay) => {
                warn!(%id, pending, ?delay, "notification queued for retry");
                self.spawn_rounds(delay);
            }
            None if inner.scheduler.state() == SchedulerState::Exhausted => {
                warn!(%id, pending, "notification queued but retry rounds are exhausted");
            }
            None => {
                warn!(%id, pending, "notification queued for the pending retry round");
            }
        }
        id
    }

    /// `retry_count` recorded for deliveries made straight from the webhook.
    pub async fn intake_retry_count(&self) -> u32 {
        match self.config.budget {
            RetryBudget::Global => self.inner.lock().await.scheduler.completed_rounds(),
            RetryBudget::PerNotification => 0,
        }
    }

    pub async fn status(&self) -> RetryStatus {
        let inner = self.inner.lock().await;
        RetryStatus {
            state: inner.scheduler.state(),
            budget: self.config.budget,
            completed_rounds: inner.scheduler.completed_rounds(),
            max_rounds: self.config.max_rounds,
            pending: inner.queue.snapshot(),
            abandoned: inner.abandoned.len(),
        }
    }

    /// One pass over a snapshot of the queue. Items queued while the pass is
    /// running wait for the next round. A notification leaves the queue once
    /// the messenger accepted it, whether or not the log write worked.
    pub async fn drain_once(&self) -> DrainReport {
        let (snapshot, round) = {
            let inner = self.inner.lock().await;
            (
                inner.queue.snapshot(),
                inner.scheduler.completed_rounds() + 1,
            )
        };

        let mut report = DrainReport::default();
        for notification in snapshot {
            report.attempted.push(notification.id);
            let retry_count = match self.config.budget {
                RetryBudget::Global => round,
                RetryBudget::PerNotification => notification.attempts + 1,
            };

            let delivered = match self
                .dispatcher
                .handle(&notification.payload, retry_count)
                .await
            {
                Ok(_) => true,
                Err(err) => {
                    warn!(
                        id = %notification.id,
                        kind = err.kind(),
                        error = %err,
                        "retry attempt failed"
                    );
                    err.delivered()
                }
            };

            if delivered {
                self.inner.lock().await.queue.remove(notification.id);
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }
        report
    }

    fn spawn_rounds(self: &Arc<Self>, delay: Duration) {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.run_rounds(delay).await });
    }

    async fn run_rounds(&self, mut delay: Duration) {
        loop {
            debug!(?delay, "retry round armed");
            sleep(delay).await;

            let report = self.drain_once().await;
            match self.complete_round(report).await {
                Some(next) => delay = next,
                None => break,
            }
        }
    }

    async fn complete_round(&self, report: DrainReport) -> Option<Duration> {
        let mut inner = self.inner.lock().await;

        if self.config.budget == RetryBudget::PerNotification {
            let expired = inner.queue.age(&report.attempted, self.config.max_rounds);
            for notification in &expired {
                warn!(
                    id = %notification.id,
                    attempts = notification.attempts,
                    "giving up on notification"
                );
            }
            inner.abandoned.extend(expired);
        }

        let queue_empty = inner.queue.is_empty();
        let next = inner.scheduler.on_round_complete(queue_empty);
        info!(
            round = inner.scheduler.completed_rounds(),
            delivered = report.delivered,
            failed = report.failed,
            pending = inner.queue.len(),
            "retry round finished"
        );

        if next.is_none() && inner.scheduler.state() == SchedulerState::Exhausted {
            warn!(
                pending = inner.queue.len(),
                "retry rounds exhausted; pending notifications will not be retried"
            );
        }
        next
    }
}
