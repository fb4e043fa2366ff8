//! Envelope for forum events arriving over an event bus.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Identifier of one delivered event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Random v4 identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A forum event: routing type plus an untyped JSON payload.
///
/// Handlers pick the payload type from `event_type` and decode it with
/// [`EventEnvelope::payload_as`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,

    /// Routing key, e.g. `topic.posted.v1`.
    pub event_type: String,

    pub occurred_at: Timestamp,

    pub payload: JsonValue,

    /// Request that caused the event, when the host tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl EventEnvelope {
    /// Wraps `payload` in a fresh envelope stamped with the current time.
    pub fn new(event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            correlation_id: None,
        }
    }

    /// Decodes the payload.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}
