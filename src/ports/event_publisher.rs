//! EventPublisher port - How forum events reach the notification core.
//!
//! The host forum publishes topic, reply and user-deletion events. This
//! crate only consumes them; embedding hosts and tests publish through this
//! port to drive the handlers.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers `event` to every handler subscribed to its type.
    ///
    /// Handler errors are returned after all handlers have run.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publishes events in order, stopping at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
