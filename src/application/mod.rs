//! Application layer - Subscription management and notification dispatch.
//!
//! Orchestrates the domain through the ports. Handlers are the public entry
//! points; dispatchers run detached, one per active delivery channel.

pub mod audience;
pub mod delivery_mode;
pub mod dispatch;
pub mod handlers;
pub mod subscriptions;

#[cfg(test)]
pub(crate) mod test_support;

pub use audience::AudienceResolver;
pub use delivery_mode::DeliveryModeResolver;
pub use dispatch::{
    EmailDispatchReport, EmailDispatcher, NotificationDispatcher, NotificationOutcome,
    DEFAULT_EMAIL_CONCURRENCY,
};
pub use handlers::{
    CategoryEventHandler, CategoryNotifications, DispatchHandles, DispatchOptions,
    DispatchSummary, NotificationPorts,
};
pub use subscriptions::SubscriptionService;
