//! NotificationDispatcher - In-app notification fan-out.

use std::sync::Arc;

use crate::domain::notifications::{NotificationEvent, NotificationPayload};
use crate::ports::NotificationService;

use super::super::audience::AudienceResolver;

/// How a notification dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// No one to notify, or the audience could not be resolved.
    Skipped,
    /// The notification service failed or declined; nothing was pushed.
    Abandoned,
    /// Pushed to every resolved recipient.
    Pushed { nid: String, recipients: usize },
}

/// Builds one notification per event and pushes it to the audience.
pub struct NotificationDispatcher {
    audience: Arc<AudienceResolver>,
    notifications: Arc<dyn NotificationService>,
}

impl NotificationDispatcher {
    pub fn new(audience: Arc<AudienceResolver>, notifications: Arc<dyn NotificationService>) -> Self {
        Self {
            audience,
            notifications,
        }
    }

    /// Notifies every subscriber of the event's category except its author.
    ///
    /// Failures end the dispatch and are logged; they are never returned.
    pub async fn dispatch(&self, event: &NotificationEvent) -> NotificationOutcome {
        let category_id = event.category_id();
        let author = event.author().uid;

        let recipients = match self.audience.resolve_audience(category_id, author).await {
            Ok(recipients) if recipients.is_empty() => return NotificationOutcome::Skipped,
            Ok(recipients) => recipients,
            Err(e) => {
                tracing::warn!(%category_id, error = %e, "Could not resolve audience, skipping notification");
                return NotificationOutcome::Skipped;
            }
        };

        let payload = NotificationPayload::from_event(event);
        let notification = match self.notifications.create(payload).await {
            Ok(Some(notification)) => notification,
            Ok(None) => {
                tracing::debug!(%category_id, kind = event.kind(), "Notification service declined to create notification");
                return NotificationOutcome::Abandoned;
            }
            Err(e) => {
                tracing::warn!(%category_id, error = %e, "Notification creation failed");
                return NotificationOutcome::Abandoned;
            }
        };

        if let Err(e) = self.notifications.push(&notification, &recipients).await {
            tracing::warn!(nid = %notification.nid, error = %e, "Notification push failed");
            return NotificationOutcome::Abandoned;
        }

        tracing::info!(
            nid = %notification.nid,
            %category_id,
            recipients = recipients.len(),
            "Pushed category notification"
        );
        NotificationOutcome::Pushed {
            nid: notification.nid,
            recipients: recipients.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySortedSetStore, RecordingNotificationService};
    use crate::application::subscriptions::SubscriptionService;
    use crate::application::test_support::FlakyStore;
    use crate::domain::foundation::{CategoryId, UserId};
    use crate::domain::notifications::fixtures::{reply_event, topic_event};
    use crate::domain::notifications::subscribers_key;
    use crate::ports::SortedSetStore;

    async fn audience_for(cid: u64, uids: &[u64]) -> Arc<AudienceResolver> {
        let store = Arc::new(InMemorySortedSetStore::new());
        for (i, uid) in uids.iter().enumerate() {
            store
                .add(&subscribers_key(CategoryId::new(cid)), i as i64, &uid.to_string())
                .await
                .unwrap();
        }
        Arc::new(AudienceResolver::new(Arc::new(SubscriptionService::new(store))))
    }

    #[tokio::test]
    async fn pushes_to_everyone_but_author() {
        let service = Arc::new(RecordingNotificationService::new());
        let dispatcher = NotificationDispatcher::new(audience_for(1, &[1, 2, 3]).await, service.clone());

        let outcome = dispatcher.dispatch(&topic_event(1, 1).into()).await;

        assert_eq!(
            outcome,
            NotificationOutcome::Pushed {
                nid: "tid:100:uid:1".to_string(),
                recipients: 2
            }
        );
        let pushed = service.pushed().await;
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].1, vec![UserId::new(2), UserId::new(3)]);
    }

    #[tokio::test]
    async fn empty_audience_creates_nothing() {
        let service = Arc::new(RecordingNotificationService::new());
        let dispatcher = NotificationDispatcher::new(audience_for(1, &[4]).await, service.clone());

        let outcome = dispatcher.dispatch(&reply_event(1, 4).into()).await;

        assert_eq!(outcome, NotificationOutcome::Skipped);
        assert!(service.created().await.is_empty());
    }

    #[tokio::test]
    async fn creation_failure_abandons_push() {
        let service = Arc::new(RecordingNotificationService::new().fail_create());
        let dispatcher = NotificationDispatcher::new(audience_for(1, &[2]).await, service.clone());

        let outcome = dispatcher.dispatch(&reply_event(1, 4).into()).await;

        assert_eq!(outcome, NotificationOutcome::Abandoned);
        assert_eq!(service.created().await.len(), 1);
        assert!(service.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn declined_creation_abandons_push() {
        let service = Arc::new(RecordingNotificationService::new().decline_create());
        let dispatcher = NotificationDispatcher::new(audience_for(1, &[2]).await, service.clone());

        assert_eq!(
            dispatcher.dispatch(&reply_event(1, 4).into()).await,
            NotificationOutcome::Abandoned
        );
        assert!(service.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn push_failure_abandons_dispatch() {
        let service = Arc::new(RecordingNotificationService::new().fail_push());
        let dispatcher = NotificationDispatcher::new(audience_for(1, &[2, 3]).await, service.clone());

        let outcome = dispatcher.dispatch(&topic_event(1, 4).into()).await;

        assert_eq!(outcome, NotificationOutcome::Abandoned);
        assert_eq!(service.created().await.len(), 1);
        assert!(service.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn audience_failure_skips_silently() {
        let store = Arc::new(FlakyStore::new().failing_key(&subscribers_key(CategoryId::new(1))));
        let audience = Arc::new(AudienceResolver::new(Arc::new(SubscriptionService::new(store))));
        let service = Arc::new(RecordingNotificationService::new());
        let dispatcher = NotificationDispatcher::new(audience, service.clone());

        assert_eq!(
            dispatcher.dispatch(&topic_event(1, 4).into()).await,
            NotificationOutcome::Skipped
        );
        assert!(service.created().await.is_empty());
    }
}
