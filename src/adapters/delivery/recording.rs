//! Recording delivery adapters.
//!
//! Capture what would have been delivered instead of delivering it. Hosts
//! use them for dry runs and tests; failure injection covers the
//! partial-failure paths of the dispatchers.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::notifications::{EmailParams, Notification, NotificationPayload};
use crate::ports::{EmailSender, NotificationService};

// ============================================
// Notifications
// ============================================

/// Notification service that keeps every created and pushed notification.
#[derive(Default)]
pub struct RecordingNotificationService {
    created: Mutex<Vec<NotificationPayload>>,
    pushed: Mutex<Vec<(Notification, Vec<UserId>)>>,
    fail_create: AtomicBool,
    decline_create: AtomicBool,
    fail_push: AtomicBool,
}

impl RecordingNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create` return an error.
    pub fn fail_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    /// Makes `create` succeed without producing a notification.
    pub fn decline_create(self) -> Self {
        self.decline_create.store(true, Ordering::SeqCst);
        self
    }

    /// Makes `push` return an error. Nothing is recorded as pushed.
    pub fn fail_push(self) -> Self {
        self.fail_push.store(true, Ordering::SeqCst);
        self
    }

    /// Payloads passed to `create`, in call order.
    pub async fn created(&self) -> Vec<NotificationPayload> {
        self.created.lock().await.clone()
    }

    /// Notifications pushed, with their recipients.
    pub async fn pushed(&self) -> Vec<(Notification, Vec<UserId>)> {
        self.pushed.lock().await.clone()
    }
}

#[async_trait]
impl NotificationService for RecordingNotificationService {
    async fn create(
        &self,
        payload: NotificationPayload,
    ) -> Result<Option<Notification>, DomainError> {
        self.created.lock().await.push(payload.clone());

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "notification store unavailable",
            ));
        }
        if self.decline_create.load(Ordering::SeqCst) {
            return Ok(None);
        }

        Ok(Some(Notification {
            nid: payload.nid.clone(),
            payload,
        }))
    }

    async fn push(
        &self,
        notification: &Notification,
        recipients: &[UserId],
    ) -> Result<(), DomainError> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "push channel unavailable",
            )
            .with_detail("nid", notification.nid.as_str()));
        }
        self.pushed
            .lock()
            .await
            .push((notification.clone(), recipients.to_vec()));
        Ok(())
    }
}

// ============================================
// Email
// ============================================

/// One email the sender was asked to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub template: String,
    pub recipient: UserId,
    pub params: EmailParams,
}

/// Email sender that records attempts and can fail for chosen recipients.
#[derive(Default)]
pub struct RecordingEmailSender {
    attempts: Mutex<Vec<SentEmail>>,
    failing: HashSet<UserId>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends to `recipient` fail with an email error.
    pub fn failing_for(mut self, recipient: UserId) -> Self {
        self.failing.insert(recipient);
        self
    }

    /// Every send waits `delay` before completing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every attempted send, failed ones included.
    pub async fn attempts(&self) -> Vec<SentEmail> {
        self.attempts.lock().await.clone()
    }

    /// Recipients of every attempted send.
    pub async fn attempted_recipients(&self) -> Vec<UserId> {
        self.attempts
            .lock()
            .await
            .iter()
            .map(|email| email.recipient)
            .collect()
    }

    /// Highest number of sends observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(
        &self,
        template: &str,
        recipient: UserId,
        params: &EmailParams,
    ) -> Result<(), DomainError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        self.attempts.lock().await.push(SentEmail {
            template: template.to_string(),
            recipient,
            params: params.clone(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&recipient) {
            return Err(DomainError::new(ErrorCode::EmailError, "mail transport rejected recipient")
                .with_detail("uid", recipient.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PostId, TopicId};
    use crate::domain::notifications::EmailUser;

    fn payload() -> NotificationPayload {
        NotificationPayload {
            body_short: "short".to_string(),
            body_long: "long".to_string(),
            nid: "tid:1:uid:2".to_string(),
            path: "/post/3".to_string(),
            pid: PostId::new(3),
            tid: TopicId::new(1),
            from: UserId::new(2),
        }
    }

    fn params() -> EmailParams {
        EmailParams {
            subject: "s".to_string(),
            site_title: "NodeBB".to_string(),
            url: "https://forum.example.com".to_string(),
            title: "t".to_string(),
            topic_slug: "1/t".to_string(),
            category: None,
            content: "c".to_string(),
            user: EmailUser {
                slug: "bob".to_string(),
                name: "bob".to_string(),
                picture: None,
            },
            pid: None,
        }
    }

    #[tokio::test]
    async fn create_materializes_with_nid() {
        let service = RecordingNotificationService::new();
        let notification = service.create(payload()).await.unwrap().unwrap();

        assert_eq!(notification.nid, "tid:1:uid:2");
        assert_eq!(service.created().await.len(), 1);
    }

    #[tokio::test]
    async fn declined_create_yields_none() {
        let service = RecordingNotificationService::new().decline_create();
        assert!(service.create(payload()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failing_create_errors() {
        let service = RecordingNotificationService::new().fail_create();
        let err = service.create(payload()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationError);
    }

    #[tokio::test]
    async fn failing_push_records_nothing() {
        let service = RecordingNotificationService::new().fail_push();
        let notification = service.create(payload()).await.unwrap().unwrap();

        let err = service
            .push(&notification, &[UserId::new(5)])
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotificationError);
        assert_eq!(err.detail("nid"), Some("tid:1:uid:2"));
        assert!(service.pushed().await.is_empty());
    }

    #[tokio::test]
    async fn failing_recipient_is_still_recorded() {
        let sender = RecordingEmailSender::new().failing_for(UserId::new(3));

        assert!(sender.send("tpl", UserId::new(1), &params()).await.is_ok());
        assert!(sender.send("tpl", UserId::new(3), &params()).await.is_err());
        assert_eq!(
            sender.attempted_recipients().await,
            vec![UserId::new(1), UserId::new(3)]
        );
    }
}
