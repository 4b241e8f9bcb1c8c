use poem_openapi::Enum;

use crate::{
    application::services::retry::{RetryBudget, SchedulerState},
    domain::models::DeliveryStatus,
};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeliveryStatusKind {
    #[oai(rename = "sent")]
    Sent,
}

impl From<DeliveryStatus> for DeliveryStatusKind {
    fn from(value: DeliveryStatus) -> Self {
        match value {
            DeliveryStatus::Sent => DeliveryStatusKind::Sent,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum SchedulerStateKind {
    #[oai(rename = "idle")]
    Idle,
    #[oai(rename = "round_scheduled")]
    RoundScheduled,
    #[oai(rename = "exhausted")]
    Exhausted,
}

impl From<SchedulerState> for SchedulerStateKind {
    fn from(value: SchedulerState) -> Self {
        match value {
            SchedulerState::Idle => SchedulerStateKind::Idle,
            SchedulerState::RoundScheduled => SchedulerStateKind::RoundScheduled,
            SchedulerState::Exhausted => SchedulerStateKind::Exhausted,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RetryBudgetKind {
    #[oai(rename = "global")]
    Global,
    #[oai(rename = "per_notification")]
    PerNotification,
}

impl From<RetryBudget> for RetryBudgetKind {
    fn from(value: RetryBudget) -> Self {
        match value {
            RetryBudget::Global => RetryBudgetKind::Global,
            RetryBudget::PerNotification => RetryBudgetKind::PerNotification,
        }
    }
}
