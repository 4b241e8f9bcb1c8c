pub mod get_retry_status;
pub mod list_delivery_log;
pub mod relay_post;
pub mod verify_subscription;
