//! Sorted-set store adapters.
//!
//! - `InMemorySortedSetStore` - Process-local store for tests and single-node hosts
//! - `RedisSortedSetStore` - Redis-backed store for production
//! - `StoreCategoryLister` - Category enumeration over either store

mod category_lister;
mod in_memory;
mod redis;

pub use self::redis::{connect, RedisSortedSetStore};
pub use category_lister::StoreCategoryLister;
pub use in_memory::InMemorySortedSetStore;
