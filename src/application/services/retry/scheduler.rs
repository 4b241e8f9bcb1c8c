use std::time::Duration;

/// How the retry ceiling is accounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    /// One process-wide round counter that never resets. Once the ceiling is
    /// reached nothing is ever retried again, including notifications queued
    /// later.
    Global,
    /// Every notification gets `max_rounds` attempts of its own; the round
    /// counter resets whenever the queue drains completely.
    PerNotification,
}

impl RetryBudget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryBudget::Global => "global",
            RetryBudget::PerNotification => "per_notification",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "global" => Some(RetryBudget::Global),
            "per_notification" => Some(RetryBudget::PerNotification),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub base_interval: Duration,
    pub max_rounds: u32,
    pub budget: RetryBudget,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_secs(10),
            max_rounds: 5,
            budget: RetryBudget::Global,
        }
    }
}

impl RetryConfig {
    /// Delay before the round that follows `completed_rounds` finished rounds:
    /// `(completed_rounds + 1) * base_interval`, never longer than the delay of
    /// the last round below the ceiling.
    pub fn delay_for_round(&self, completed_rounds: u32) -> Duration {
        let step = completed_rounds.min(self.max_rounds.saturating_sub(1)) + 1;
        self.base_interval.saturating_mul(step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    RoundScheduled,
    Exhausted,
}

/// Pure state machine deciding when drain rounds happen. It never touches a
/// timer itself; callers arm one for every delay it hands back.
#[derive(Debug)]
pub struct RetryScheduler {
    config: RetryConfig,
    state: SchedulerState,
    completed_rounds: u32,
}

impl RetryScheduler {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            state: SchedulerState::Idle,
            completed_rounds: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn completed_rounds(&self) -> u32 {
        self.completed_rounds
    }

    /// A notification was queued. Returns the delay of the round to arm when
    /// none is pending yet.
    pub fn on_enqueue(&mut self) -> Option<Duration> {
        match self.state {
            SchedulerState::Idle => self.schedule_next(),
            SchedulerState::RoundScheduled | SchedulerState::Exhausted => None,
        }
    }

    /// A drain round finished. Returns the delay of the next round, if any.
    pub fn on_round_complete(&mut self, queue_empty: bool) -> Option<Duration> {
        self.completed_rounds = self.completed_rounds.saturating_add(1);

        if self.config.budget == RetryBudget::PerNotification && queue_empty {
            self.completed_rounds = 0;
            self.state = SchedulerState::Idle;
            return None;
        }

        self.schedule_next()
    }

    fn schedule_next(&mut self) -> Option<Duration> {
        match self.config.budget {
            RetryBudget::Global if self.completed_rounds >= self.config.max_rounds => {
                self.state = SchedulerState::Exhausted;
                None
            }
            RetryBudget::PerNotification if self.config.max_rounds == 0 => {
                self.state = SchedulerState::Exhausted;
                None
            }
            _ => {
                self.state = SchedulerState::RoundScheduled;
                Some(self.config.delay_for_round(self.completed_rounds))
            }
        }
    }
}
