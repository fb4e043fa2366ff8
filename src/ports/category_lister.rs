//! CategoryLister port - Interface for enumerating forum categories.

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, DomainError};

/// Port for listing every category on the forum, in display order.
#[async_trait]
pub trait CategoryLister: Send + Sync {
    async fn list_all_category_ids(&self) -> Result<Vec<CategoryId>, DomainError>;
}
