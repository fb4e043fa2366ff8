//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the notification core and the host forum. Adapters implement these ports.
//!
//! ## Storage and Settings Ports
//!
//! - `SortedSetStore` - Scored-set storage backing category subscriptions
//! - `SettingsReader` - Live plugin settings (delivery mode)
//! - `CategoryLister` - Enumeration of every forum category
//!
//! ## Delivery Ports
//!
//! - `NotificationService` - In-app notification creation and push
//! - `EmailSender` - Templated email per recipient
//! - `TicketNotifier` - Optional external ticketing integration
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing forum events
//! - `EventSubscriber` - Port for subscribing to forum events
//! - `EventHandler` - Handler that processes incoming events

mod category_lister;
mod email_sender;
mod event_publisher;
mod event_subscriber;
mod notification_service;
mod settings_reader;
mod sorted_set_store;
mod ticket_notifier;

pub use category_lister::CategoryLister;
pub use email_sender::EmailSender;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use notification_service::NotificationService;
pub use settings_reader::{PluginSettings, SettingsReader};
pub use sorted_set_store::{SortedSetStore, StoreError};
pub use ticket_notifier::TicketNotifier;
