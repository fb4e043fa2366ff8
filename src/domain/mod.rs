//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, events, errors)
//! - `notifications` - Delivery modes, forum events and delivery payloads

pub mod foundation;
pub mod notifications;
