//! Category listing backed by the forum's `categories:cid` sorted set.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{CategoryId, DomainError};
use crate::domain::notifications::CATEGORIES_KEY;
use crate::ports::{CategoryLister, SortedSetStore};

/// Lists categories from the same store that holds subscriptions.
pub struct StoreCategoryLister {
    store: Arc<dyn SortedSetStore>,
}

impl StoreCategoryLister {
    pub fn new(store: Arc<dyn SortedSetStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryLister for StoreCategoryLister {
    async fn list_all_category_ids(&self) -> Result<Vec<CategoryId>, DomainError> {
        let members = self.store.range_all(CATEGORIES_KEY).await?;

        Ok(members
            .iter()
            .filter_map(|member| match member.parse::<CategoryId>() {
                Ok(cid) => Some(cid),
                Err(e) => {
                    tracing::warn!(member = %member, error = %e, "Skipping malformed category id");
                    None
                }
            })
            .collect())
    }
}
