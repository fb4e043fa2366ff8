//! AudienceResolver - Who gets notified about a post.

use std::sync::Arc;

use crate::domain::foundation::{CategoryId, DomainError, UserId};

use super::subscriptions::SubscriptionService;

/// Resolves the subscribers of a category minus the acting author.
pub struct AudienceResolver {
    subscriptions: Arc<SubscriptionService>,
}

impl AudienceResolver {
    pub fn new(subscriptions: Arc<SubscriptionService>) -> Self {
        Self { subscriptions }
    }

    /// Subscribers of `category_id` in subscription order, without `excluded`.
    ///
    /// Both sides are compared as normalized `UserId`s, so an author id that
    /// arrived as `"2"` still excludes the stored member `2`. A category with
    /// no subscribers yields an empty vector; store failures are returned.
    pub async fn resolve_audience(
        &self,
        category_id: CategoryId,
        excluded: UserId,
    ) -> Result<Vec<UserId>, DomainError> {
        let audience: Vec<UserId> = self
            .subscriptions
            .subscribers(category_id)
            .await?
            .into_iter()
            .filter(|uid| *uid != excluded)
            .collect();

        tracing::debug!(%category_id, %excluded, recipients = audience.len(), "Resolved audience");
        Ok(audience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySortedSetStore;
    use crate::application::test_support::FlakyStore;
    use crate::domain::notifications::subscribers_key;
    use crate::ports::SortedSetStore;

    async fn resolver_with(cid: CategoryId, uids: &[u64]) -> AudienceResolver {
        let store = Arc::new(InMemorySortedSetStore::new());
        for (i, uid) in uids.iter().enumerate() {
            store
                .add(&subscribers_key(cid), i as i64, &uid.to_string())
                .await
                .unwrap();
        }
        AudienceResolver::new(Arc::new(SubscriptionService::new(store)))
    }

    #[tokio::test]
    async fn excludes_numeric_author() {
        let cid = CategoryId::new(1);
        let resolver = resolver_with(cid, &[1, 2, 3]).await;

        let audience = resolver.resolve_audience(cid, UserId::new(2)).await.unwrap();
        assert_eq!(audience, vec![UserId::new(1), UserId::new(3)]);
    }

    #[tokio::test]
    async fn excludes_string_encoded_author() {
        let cid = CategoryId::new(1);
        let resolver = resolver_with(cid, &[1, 2, 3]).await;

        let excluded: UserId = "2".parse().unwrap();
        let audience = resolver.resolve_audience(cid, excluded).await.unwrap();
        assert_eq!(audience, vec![UserId::new(1), UserId::new(3)]);
    }

    #[tokio::test]
    async fn excludes_author_from_json_string() {
        let cid = CategoryId::new(1);
        let resolver = resolver_with(cid, &[1, 2, 3]).await;

        let excluded: UserId = serde_json::from_str(r#""2""#).unwrap();
        let audience = resolver.resolve_audience(cid, excluded).await.unwrap();
        assert_eq!(audience, vec![UserId::new(1), UserId::new(3)]);
    }

    #[tokio::test]
    async fn empty_category_yields_empty_audience() {
        let resolver = resolver_with(CategoryId::new(1), &[]).await;
        let audience = resolver
            .resolve_audience(CategoryId::new(1), UserId::new(2))
            .await
            .unwrap();
        assert!(audience.is_empty());
    }

    #[tokio::test]
    async fn author_as_only_subscriber_yields_empty_audience() {
        let cid = CategoryId::new(1);
        let resolver = resolver_with(cid, &[2]).await;
        assert!(resolver
            .resolve_audience(cid, UserId::new(2))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_returned() {
        let cid = CategoryId::new(1);
        let store = Arc::new(FlakyStore::new().failing_key(&subscribers_key(cid)));
        let resolver = AudienceResolver::new(Arc::new(SubscriptionService::new(store)));

        assert!(resolver.resolve_audience(cid, UserId::new(2)).await.is_err());
    }
}
