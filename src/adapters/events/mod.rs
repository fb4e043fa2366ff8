//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus delivering forum events to handlers

mod in_memory;

pub use in_memory::{InMemoryEventBus, DEFAULT_HISTORY_LIMIT};
