//! Entry points invoked by the host forum.
//!
//! - `category_notifications` - Subscription management and post/user event handling
//! - `event_handler` - Event-bus adapter routing forum events to the above

mod category_notifications;
mod event_handler;

pub use category_notifications::{
    CategoryNotifications, DispatchHandles, DispatchOptions, DispatchSummary, NotificationPorts,
};
pub use event_handler::{CategoryEventHandler, HANDLED_EVENT_TYPES};
