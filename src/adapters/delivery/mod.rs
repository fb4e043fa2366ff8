//! Delivery adapters for notifications and email.

mod recording;

pub use recording::{RecordingEmailSender, RecordingNotificationService, SentEmail};
