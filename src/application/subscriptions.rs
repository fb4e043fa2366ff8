//! SubscriptionService - Category subscription membership.
//!
//! Thin layer over the sorted-set store: one set per category, members are
//! user ids scored by subscription time. Store failures propagate to the
//! caller unchanged.

use std::sync::Arc;

use crate::domain::foundation::{CategoryId, DomainError, Timestamp, UserId};
use crate::domain::notifications::subscribers_key;
use crate::ports::SortedSetStore;

/// Subscribe, unsubscribe and membership queries for category subscriptions.
pub struct SubscriptionService {
    store: Arc<dyn SortedSetStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SortedSetStore>) -> Self {
        Self { store }
    }

    /// Returns true if `user_id` is subscribed to `category_id`.
    pub async fn is_subscribed(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<bool, DomainError> {
        let key = subscribers_key(category_id);
        Ok(self.store.is_member(&key, &user_id.to_string()).await?)
    }

    /// Subscribes `user_id` to `category_id`.
    ///
    /// Idempotent: subscribing again only refreshes the ordering score.
    pub async fn subscribe(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<(), DomainError> {
        let key = subscribers_key(category_id);
        let score = Timestamp::now().as_unix_millis();
        self.store.add(&key, score, &user_id.to_string()).await?;

        tracing::debug!(%user_id, %category_id, "Subscribed to category");
        Ok(())
    }

    /// Unsubscribes `user_id` from `category_id`. Succeeds for non-members.
    pub async fn unsubscribe(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<(), DomainError> {
        let key = subscribers_key(category_id);
        self.store.remove(&key, &user_id.to_string()).await?;

        tracing::debug!(%user_id, %category_id, "Unsubscribed from category");
        Ok(())
    }

    /// Every subscriber of `category_id`, oldest subscription first.
    ///
    /// Members that are not valid user ids are skipped.
    pub async fn subscribers(&self, category_id: CategoryId) -> Result<Vec<UserId>, DomainError> {
        let members = self.store.range_all(&subscribers_key(category_id)).await?;

        Ok(members
            .iter()
            .filter_map(|member| match member.parse::<UserId>() {
                Ok(uid) => Some(uid),
                Err(e) => {
                    tracing::warn!(%category_id, member = %member, error = %e, "Ignoring malformed subscriber");
                    None
                }
            })
            .collect())
    }
}
