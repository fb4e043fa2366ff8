//! NotificationService port - Interface for in-app notifications.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notifications::{Notification, NotificationPayload};

/// Port for the forum's notification service.
///
/// `create` deduplicates on `payload.nid`: creating the same nid twice
/// yields the existing notification rather than a second one.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Materializes a notification. `Ok(None)` means the service declined
    /// to create one.
    async fn create(&self, payload: NotificationPayload)
        -> Result<Option<Notification>, DomainError>;

    /// Delivers a notification to each recipient's inbox.
    async fn push(&self, notification: &Notification, recipients: &[UserId])
        -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn NotificationService) {}
}
