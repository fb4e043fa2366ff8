//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, event envelopes, and error types
//! that form the vocabulary of the category notifications domain.

mod errors;
mod events;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{EventEnvelope, EventId};
pub use ids::{CategoryId, PostId, TopicId, UserId};
pub use timestamp::Timestamp;
