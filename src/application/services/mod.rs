pub mod notifier;
pub mod retry;
