//! In-memory retry subsystem.
//!
//! Notifications that could not be delivered wait in a [`RetryQueue`]; a
//! [`RetryScheduler`] decides when the next drain round fires and when retries
//! stop for good. [`RetryCoordinator`] owns both behind a single lock and is the
//! only place where either is mutated.
//!
//! Nothing here survives a restart.

mod coordinator;
mod queue;
mod scheduler;

pub use coordinator::{DrainReport, RetryCoordinator, RetryStatus};
pub use queue::RetryQueue;
pub use scheduler::{RetryBudget, RetryConfig, RetryScheduler, SchedulerState};
