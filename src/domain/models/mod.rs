pub mod delivery;
pub mod notification;
pub mod post;

pub use delivery::{DeliveryError, DeliveryLogRecord, DeliveryOutcome, DeliveryStatus};
pub use notification::Notification;
pub use post::PostDetails;
