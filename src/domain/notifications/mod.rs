//! Category notifications domain module.
//!
//! # Module Structure
//!
//! - `delivery_mode` - Site-wide channel selection
//! - `events` - Topic, reply and user-deletion events
//! - `payload` - Notification, email and ticket payloads
//! - `subscription` - Subscriber set addressing

mod delivery_mode;
mod events;
mod payload;
mod subscription;

pub use delivery_mode::{DeliveryMode, ResolvedMode};
pub use events::{
    NotificationEvent, PostAuthor, ReplyEvent, TopicEvent, UserDeleted, POST_REPLIED,
    TOPIC_POSTED, USER_DELETED,
};
pub use payload::{
    EmailCategory, EmailParams, EmailPayload, EmailUser, Notification, NotificationPayload,
    SiteInfo, TicketNotice, REPLY_EMAIL_TEMPLATE, TOPIC_EMAIL_TEMPLATE,
};
pub use subscription::{subscribers_key, CATEGORIES_KEY};

#[cfg(test)]
pub(crate) use events::fixtures;
