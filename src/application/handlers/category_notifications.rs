//! CategoryNotifications - Public entry points of the notification core.
//!
//! Subscription management is delegated straight to the store. Post events
//! resolve the delivery mode, then spawn one detached task per active
//! channel and return without waiting for delivery. User deletion walks
//! every category and unsubscribes the user, one category at a time.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::audience::AudienceResolver;
use crate::application::delivery_mode::DeliveryModeResolver;
use crate::application::dispatch::{
    EmailDispatchReport, EmailDispatcher, NotificationDispatcher, NotificationOutcome,
    DEFAULT_EMAIL_CONCURRENCY,
};
use crate::application::subscriptions::SubscriptionService;
use crate::config::AppConfig;
use crate::domain::foundation::{CategoryId, DomainError, UserId};
use crate::domain::notifications::{
    DeliveryMode, NotificationEvent, ReplyEvent, ResolvedMode, SiteInfo, TopicEvent,
};
use crate::ports::{
    CategoryLister, EmailSender, NotificationService, SettingsReader, SortedSetStore,
    TicketNotifier,
};

/// Ports the notification core is wired to.
#[derive(Clone)]
pub struct NotificationPorts {
    pub store: Arc<dyn SortedSetStore>,
    pub settings: Arc<dyn SettingsReader>,
    pub notifications: Arc<dyn NotificationService>,
    pub email: Arc<dyn EmailSender>,
    pub categories: Arc<dyn CategoryLister>,
    pub tickets: Option<Arc<dyn TicketNotifier>>,
}

/// Tunables for dispatch.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Settings namespace holding the delivery mode.
    pub settings_namespace: String,
    /// Maximum simultaneous email sends per dispatch.
    pub email_concurrency: usize,
    /// Forum identity used in email params.
    pub site: SiteInfo,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            settings_namespace: "category-notifications".to_string(),
            email_concurrency: DEFAULT_EMAIL_CONCURRENCY,
            site: SiteInfo {
                title: "NodeBB".to_string(),
                url: String::new(),
            },
        }
    }
}

impl DispatchOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            settings_namespace: config.dispatch.settings_namespace.clone(),
            email_concurrency: config.dispatch.email_concurrency,
            site: config.site.site_info(),
        }
    }

    pub fn with_site(mut self, site: SiteInfo) -> Self {
        self.site = site;
        self
    }

    pub fn with_email_concurrency(mut self, concurrency: usize) -> Self {
        self.email_concurrency = concurrency;
        self
    }

    pub fn with_settings_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.settings_namespace = namespace.into();
        self
    }
}

/// Handles to the dispatch tasks spawned for one event.
///
/// Dropping the handles detaches the tasks; they run to completion either way.
#[derive(Debug, Default)]
pub struct DispatchHandles {
    pub notification: Option<JoinHandle<NotificationOutcome>>,
    pub email: Option<JoinHandle<EmailDispatchReport>>,
}

impl DispatchHandles {
    /// True when no channel fired.
    pub fn is_empty(&self) -> bool {
        self.notification.is_none() && self.email.is_none()
    }

    /// Waits for every spawned dispatch to finish.
    pub async fn join(self) -> DispatchSummary {
        let notification = match self.notification {
            Some(handle) => join_logged(handle, "notification").await,
            None => None,
        };
        let email = match self.email {
            Some(handle) => join_logged(handle, "email").await,
            None => None,
        };
        DispatchSummary {
            notification,
            email,
        }
    }
}

/// Outcomes of the channels that fired for one event.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    pub notification: Option<NotificationOutcome>,
    pub email: Option<EmailDispatchReport>,
}

async fn join_logged<T>(handle: JoinHandle<T>, channel: &'static str) -> Option<T> {
    match handle.await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::error!(channel, error = %e, "Dispatch task did not complete");
            None
        }
    }
}

/// Subscription management and post-event fan-out for forum categories.
pub struct CategoryNotifications {
    subscriptions: Arc<SubscriptionService>,
    delivery_mode: DeliveryModeResolver,
    notification_dispatcher: Arc<NotificationDispatcher>,
    email_dispatcher: Arc<EmailDispatcher>,
    categories: Arc<dyn CategoryLister>,
}

impl CategoryNotifications {
    pub fn new(ports: NotificationPorts, options: DispatchOptions) -> Self {
        let subscriptions = Arc::new(SubscriptionService::new(ports.store));
        let audience = Arc::new(AudienceResolver::new(Arc::clone(&subscriptions)));

        let mut email_dispatcher =
            EmailDispatcher::new(Arc::clone(&audience), ports.email, options.site)
                .with_concurrency(options.email_concurrency);
        if let Some(tickets) = ports.tickets {
            email_dispatcher = email_dispatcher.with_ticket_notifier(tickets);
        }

        Self {
            subscriptions,
            delivery_mode: DeliveryModeResolver::new(ports.settings, options.settings_namespace),
            notification_dispatcher: Arc::new(NotificationDispatcher::new(
                audience,
                ports.notifications,
            )),
            email_dispatcher: Arc::new(email_dispatcher),
            categories: ports.categories,
        }
    }

    pub async fn is_subscribed(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<bool, DomainError> {
        self.subscriptions.is_subscribed(user_id, category_id).await
    }

    pub async fn subscribe(&self, user_id: UserId, category_id: CategoryId) -> Result<(), DomainError> {
        self.subscriptions.subscribe(user_id, category_id).await
    }

    pub async fn unsubscribe(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<(), DomainError> {
        self.subscriptions.unsubscribe(user_id, category_id).await
    }

    /// Fans a new topic out to the category's subscribers.
    ///
    /// # Errors
    ///
    /// Only a failure to read the delivery mode is returned; delivery
    /// failures happen in the spawned tasks and are logged there.
    pub async fn on_topic_post(&self, topic: TopicEvent) -> Result<DispatchHandles, DomainError> {
        self.on_post_event(topic.into()).await
    }

    /// Fans a reply out to the category's subscribers.
    ///
    /// # Errors
    ///
    /// Same as [`Self::on_topic_post`].
    pub async fn on_topic_reply(&self, reply: ReplyEvent) -> Result<DispatchHandles, DomainError> {
        self.on_post_event(reply.into()).await
    }

    /// Removes a deleted user from every category's subscriber set.
    ///
    /// Categories are processed in listing order. A failing category is
    /// logged and skipped; the cascade never fails as a whole.
    pub async fn on_user_delete(&self, user_id: UserId) {
        let category_ids = match self.categories.list_all_category_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(%user_id, error = %e, "Could not list categories for user deletion");
                return;
            }
        };

        let mut failed = 0usize;
        for category_id in &category_ids {
            if let Err(e) = self.subscriptions.unsubscribe(user_id, *category_id).await {
                failed += 1;
                tracing::warn!(%user_id, %category_id, error = %e, "Failed to unsubscribe deleted user");
            }
        }

        tracing::info!(
            %user_id,
            categories = category_ids.len(),
            failed,
            "Removed deleted user's category subscriptions"
        );
    }

    async fn on_post_event(&self, event: NotificationEvent) -> Result<DispatchHandles, DomainError> {
        let mode = match self.delivery_mode.resolve_mode().await? {
            ResolvedMode::Known(mode) => mode,
            ResolvedMode::Unrecognized(value) => {
                tracing::debug!(
                    mode = %value,
                    kind = event.kind(),
                    "Unrecognized delivery mode, nothing dispatched"
                );
                return Ok(DispatchHandles::default());
            }
        };

        Ok(self.spawn_dispatch(mode, event))
    }

    fn spawn_dispatch(&self, mode: DeliveryMode, event: NotificationEvent) -> DispatchHandles {
        tracing::debug!(
            mode = mode.as_str(),
            kind = event.kind(),
            category_id = %event.category_id(),
            "Dispatching post event"
        );

        let email = mode.sends_email().then(|| {
            let dispatcher = Arc::clone(&self.email_dispatcher);
            let event = event.clone();
            tokio::spawn(async move { dispatcher.dispatch(&event).await })
        });

        let notification = mode.sends_notification().then(|| {
            let dispatcher = Arc::clone(&self.notification_dispatcher);
            tokio::spawn(async move { dispatcher.dispatch(&event).await })
        });

        DispatchHandles {
            notification,
            email,
        }
    }
}
