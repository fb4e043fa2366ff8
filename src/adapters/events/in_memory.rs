//! In-memory event bus.
//!
//! Delivers forum events to handlers in the publishing task, in
//! subscription order. Used by hosts that run the forum and the
//! notification core in one process, and by tests. Only the most recent
//! envelopes are kept for inspection.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Envelopes retained by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

type HandlerMap = HashMap<String, Vec<Arc<dyn EventHandler>>>;

/// In-process event bus that remembers the last few published events.
///
/// Handler lists are guarded by a blocking lock that is never held across
/// an `.await`, so subscribing is always immediate.
pub struct InMemoryEventBus {
    handlers: RwLock<HandlerMap>,
    history: RwLock<VecDeque<EventEnvelope>>,
    history_limit: usize,
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` envelopes; zero disables history.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            history: RwLock::new(VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT))),
            history_limit: limit,
        }
    }

    /// Types of the retained events, oldest first.
    pub fn published_types(&self) -> Vec<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    fn remember(&self, event: &EventEnvelope) {
        if self.history_limit == 0 {
            return;
        }
        let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
        while history.len() >= self.history_limit {
            history.pop_front();
        }
        history.push_back(event.clone());
    }

    fn handlers_for(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.remember(&event);

        let mut failed = Vec::new();
        for handler in self.handlers_for(&event.event_type) {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    event_id = %event.event_id,
                    error = %e,
                    "Event handler failed"
                );
                failed.push(format!("{}: {}", handler.name(), e));
            }
        }

        if failed.is_empty() {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::InternalError,
            format!("{} handler(s) failed: {}", failed.len(), failed.join("; ")),
        )
        .with_detail("event_type", event.event_type))
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }
}
