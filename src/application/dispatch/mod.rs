//! Dispatchers that deliver a post event to its audience.

mod email;
mod notification;

pub use email::{EmailDispatchReport, EmailDispatcher, DEFAULT_EMAIL_CONCURRENCY};
pub use notification::{NotificationDispatcher, NotificationOutcome};
