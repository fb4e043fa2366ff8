//! EmailDispatcher - Bounded-concurrency email fan-out.
//!
//! One payload is built per event and sent to every recipient, at most
//! `concurrency` sends at a time. A failed send never stops the others;
//! failures are collected into the report once every recipient has been
//! attempted.

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notifications::{EmailPayload, NotificationEvent, SiteInfo, TicketNotice};
use crate::ports::{EmailSender, TicketNotifier};

use super::super::audience::AudienceResolver;

/// Default ceiling on simultaneous sends.
pub const DEFAULT_EMAIL_CONCURRENCY: usize = 50;

/// Result of one email dispatch, for logs and callers that wait on it.
#[derive(Debug, Clone, Default)]
pub struct EmailDispatchReport {
    /// Recipients a send was attempted for.
    pub attempted: usize,
    /// Recipients whose send failed, with the error.
    pub failures: Vec<(UserId, DomainError)>,
}

impl EmailDispatchReport {
    /// Sends that succeeded.
    pub fn delivered(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// The first failure, if any.
    pub fn first_error(&self) -> Option<&DomainError> {
        self.failures.first().map(|(_, e)| e)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Emails the audience of a post event.
pub struct EmailDispatcher {
    audience: Arc<AudienceResolver>,
    sender: Arc<dyn EmailSender>,
    tickets: Option<Arc<dyn TicketNotifier>>,
    site: SiteInfo,
    concurrency: usize,
}

impl EmailDispatcher {
    pub fn new(audience: Arc<AudienceResolver>, sender: Arc<dyn EmailSender>, site: SiteInfo) -> Self {
        Self {
            audience,
            sender,
            tickets: None,
            site,
            concurrency: DEFAULT_EMAIL_CONCURRENCY,
        }
    }

    /// Sets the concurrency ceiling. Values below 1 are raised to 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Announces new topics to a ticketing system alongside the emails.
    pub fn with_ticket_notifier(mut self, tickets: Arc<dyn TicketNotifier>) -> Self {
        self.tickets = Some(tickets);
        self
    }

    /// Emails every subscriber of the event's category except its author.
    pub async fn dispatch(&self, event: &NotificationEvent) -> EmailDispatchReport {
        let category_id = event.category_id();

        let recipients = match self
            .audience
            .resolve_audience(category_id, event.author().uid)
            .await
        {
            Ok(recipients) if recipients.is_empty() => return EmailDispatchReport::default(),
            Ok(recipients) => recipients,
            Err(e) => {
                tracing::warn!(%category_id, error = %e, "Could not resolve audience, skipping email");
                return EmailDispatchReport::default();
            }
        };

        if let (Some(tickets), NotificationEvent::Topic(topic)) = (&self.tickets, event) {
            tickets.notify(TicketNotice::for_topic(topic));
        }

        let payload = EmailPayload::from_event(event, &self.site);
        tracing::debug!(
            %category_id,
            template = payload.template,
            recipients = recipients.len(),
            "Sending category emails"
        );

        let attempted = recipients.len();
        let payload = Arc::new(payload);
        let outcomes: Vec<(UserId, Result<(), DomainError>)> = stream::iter(recipients)
            .map(|uid| {
                let sender = Arc::clone(&self.sender);
                let payload = Arc::clone(&payload);
                async move {
                    let result = sender.send(payload.template, uid, &payload.params).await;
                    (uid, result)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let failures: Vec<(UserId, DomainError)> = outcomes
            .into_iter()
            .filter_map(|(uid, result)| result.err().map(|e| (uid, e)))
            .collect();

        let report = EmailDispatchReport { attempted, failures };
        match report.first_error() {
            None => tracing::info!(%category_id, delivered = report.delivered(), "Category emails sent"),
            Some(first) => tracing::error!(
                %category_id,
                delivered = report.delivered(),
                failed = report.failures.len(),
                error = %first,
                "Some category emails failed"
            ),
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySortedSetStore, RecordingEmailSender};
    use crate::application::subscriptions::SubscriptionService;
    use crate::domain::foundation::{CategoryId, ErrorCode};
    use crate::domain::notifications::fixtures::{reply_event, topic_event};
    use crate::domain::notifications::{subscribers_key, REPLY_EMAIL_TEMPLATE};
    use crate::ports::SortedSetStore;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct CapturingTickets(Mutex<Vec<TicketNotice>>);

    impl TicketNotifier for CapturingTickets {
        fn notify(&self, notice: TicketNotice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    fn site() -> SiteInfo {
        SiteInfo {
            title: "NodeBB".to_string(),
            url: "https://forum.example.com".to_string(),
        }
    }

    async fn audience_for(cid: u64, uids: impl IntoIterator<Item = u64>) -> Arc<AudienceResolver> {
        let store = Arc::new(InMemorySortedSetStore::new());
        for (i, uid) in uids.into_iter().enumerate() {
            store
                .add(&subscribers_key(CategoryId::new(cid)), i as i64, &uid.to_string())
                .await
                .unwrap();
        }
        Arc::new(AudienceResolver::new(Arc::new(SubscriptionService::new(store))))
    }

    #[tokio::test]
    async fn sends_shared_payload_to_audience() {
        let sender = Arc::new(RecordingEmailSender::new());
        let dispatcher = EmailDispatcher::new(audience_for(1, [1, 2, 3]).await, sender.clone(), site());

        let report = dispatcher.dispatch(&reply_event(1, 2).into()).await;

        assert_eq!(report.attempted, 2);
        assert!(report.is_success());
        let attempts = sender.attempts().await;
        assert!(attempts.iter().all(|a| a.template == REPLY_EMAIL_TEMPLATE));
        assert!(attempts.iter().all(|a| a.params == attempts[0].params));
        let mut recipients = sender.attempted_recipients().await;
        recipients.sort();
        assert_eq!(recipients, vec![UserId::new(1), UserId::new(3)]);
    }

    #[tokio::test]
    async fn partial_failure_attempts_every_recipient() {
        let sender = Arc::new(RecordingEmailSender::new().failing_for(UserId::new(3)));
        let dispatcher = EmailDispatcher::new(audience_for(1, [1, 2, 3, 4, 5]).await, sender.clone(), site());

        let report = dispatcher.dispatch(&reply_event(1, 99).into()).await;

        assert_eq!(report.attempted, 5);
        assert_eq!(report.delivered(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, UserId::new(3));
        assert_eq!(report.first_error().unwrap().code, ErrorCode::EmailError);

        let mut recipients = sender.attempted_recipients().await;
        recipients.sort();
        assert_eq!(recipients, (1..=5).map(UserId::new).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let sender = Arc::new(RecordingEmailSender::new().with_delay(Duration::from_millis(5)));
        let dispatcher = EmailDispatcher::new(audience_for(1, 1..=40).await, sender.clone(), site())
            .with_concurrency(4);

        let report = dispatcher.dispatch(&reply_event(1, 999).into()).await;

        assert_eq!(report.attempted, 40);
        assert!(sender.max_in_flight() <= 4);
        assert!(sender.max_in_flight() >= 2);
    }

    #[tokio::test]
    async fn empty_audience_sends_nothing() {
        let sender = Arc::new(RecordingEmailSender::new());
        let tickets = Arc::new(CapturingTickets::default());
        let dispatcher = EmailDispatcher::new(audience_for(1, []).await, sender.clone(), site())
            .with_ticket_notifier(tickets.clone());

        let report = dispatcher.dispatch(&topic_event(1, 2).into()).await;

        assert_eq!(report.attempted, 0);
        assert!(sender.attempts().await.is_empty());
        assert!(tickets.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn topic_dispatch_notifies_ticketing_once() {
        let sender = Arc::new(RecordingEmailSender::new());
        let tickets = Arc::new(CapturingTickets::default());
        let dispatcher = EmailDispatcher::new(audience_for(1, [5, 6]).await, sender, site())
            .with_ticket_notifier(tickets.clone());

        dispatcher.dispatch(&topic_event(1, 2).into()).await;

        let notices = tickets.0.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].ticket_name, "Hello world");
    }

    #[tokio::test]
    async fn reply_dispatch_does_not_notify_ticketing() {
        let sender = Arc::new(RecordingEmailSender::new());
        let tickets = Arc::new(CapturingTickets::default());
        let dispatcher = EmailDispatcher::new(audience_for(1, [5]).await, sender, site())
            .with_ticket_notifier(tickets.clone());

        dispatcher.dispatch(&reply_event(1, 2).into()).await;

        assert!(tickets.0.lock().unwrap().is_empty());
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let audience = runtime.block_on(audience_for(1, []));
        let dispatcher =
            EmailDispatcher::new(audience, Arc::new(RecordingEmailSender::new()), site()).with_concurrency(0);
        assert_eq!(dispatcher.concurrency, 1);
    }
}
