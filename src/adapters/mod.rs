//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the notification core to the host forum:
//! - `store` - Sorted-set storage (in-memory, Redis) and category listing
//! - `settings` - Plugin settings readers (in-memory, Redis)
//! - `delivery` - Recording notification and email adapters
//! - `ticketing` - HTTP ticketing notifier
//! - `events` - Event bus implementations

pub mod delivery;
pub mod events;
pub mod settings;
pub mod store;
pub mod ticketing;

pub use delivery::{RecordingEmailSender, RecordingNotificationService, SentEmail};
pub use events::InMemoryEventBus;
pub use settings::{InMemorySettingsReader, RedisSettingsReader};
pub use store::{InMemorySortedSetStore, RedisSortedSetStore, StoreCategoryLister};
pub use ticketing::HttpTicketNotifier;
