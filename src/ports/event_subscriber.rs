//! EventSubscriber port - Routing forum events to handlers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Consumer of forum events.
///
/// `handle` runs inside the publisher's call, so slow work (delivery)
/// belongs on spawned tasks.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Name used in logs and aggregated errors.
    fn name(&self) -> &'static str;
}

/// Registry of handlers by event type.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Registers one handler instance under several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, Arc::clone(&handler));
        }
    }
}
