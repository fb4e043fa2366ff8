//! Settings reader adapters.

mod in_memory;
mod redis;

pub use self::redis::RedisSettingsReader;
pub use in_memory::InMemorySettingsReader;
