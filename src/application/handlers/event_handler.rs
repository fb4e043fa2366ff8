//! CategoryEventHandler - Event-bus entry point for the notification core.
//!
//! Routes `topic.posted.v1`, `post.replied.v1` and `user.deleted.v1`
//! envelopes to [`CategoryNotifications`]. Post dispatches are detached, so
//! handling returns as soon as the delivery mode has been read.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::notifications::{
    ReplyEvent, TopicEvent, UserDeleted, POST_REPLIED, TOPIC_POSTED, USER_DELETED,
};
use crate::ports::{EventHandler, EventSubscriber};

use super::category_notifications::CategoryNotifications;

/// Event types this handler understands.
pub const HANDLED_EVENT_TYPES: [&str; 3] = [TOPIC_POSTED, POST_REPLIED, USER_DELETED];

/// Event handler that feeds forum events into [`CategoryNotifications`].
///
/// # Example
///
/// ```ignore
/// let core = Arc::new(CategoryNotifications::new(ports, options));
/// CategoryEventHandler::new(core).subscribe_to(&event_bus);
/// ```
pub struct CategoryEventHandler {
    core: Arc<CategoryNotifications>,
}

impl CategoryEventHandler {
    pub fn new(core: Arc<CategoryNotifications>) -> Self {
        Self { core }
    }

    /// Subscribes this handler to every event type it understands.
    pub fn subscribe_to(self, subscriber: &dyn EventSubscriber) {
        subscriber.subscribe_all(&HANDLED_EVENT_TYPES, Arc::new(self));
    }
}

fn decode<T: DeserializeOwned>(event: &EventEnvelope, what: &str) -> Result<T, DomainError> {
    event.payload_as().map_err(|e| {
        DomainError::new(
            ErrorCode::InvalidFormat,
            format!("Failed to deserialize {} event: {}", what, e),
        )
        .with_detail("event_id", event.event_id.as_str())
    })
}

#[async_trait]
impl EventHandler for CategoryEventHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            correlation_id = ?event.correlation_id,
            "Handling forum event"
        );
        match event.event_type.as_str() {
            TOPIC_POSTED => {
                let topic: TopicEvent = decode(&event, "TopicPosted")?;
                self.core.on_topic_post(topic).await?;
            }
            POST_REPLIED => {
                let reply: ReplyEvent = decode(&event, "PostReplied")?;
                self.core.on_topic_reply(reply).await?;
            }
            USER_DELETED => {
                let deleted: UserDeleted = decode(&event, "UserDeleted")?;
                self.core.on_user_delete(deleted.uid).await;
            }
            other => {
                tracing::trace!(event_type = other, "Ignoring unrelated event");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CategoryEventHandler"
    }
}
