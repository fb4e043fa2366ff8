//! SortedSetStore port - Interface for the forum's scored-set storage.
//!
//! Category subscriptions live in one sorted set per category. The store
//! owns atomicity: `add` and `remove` must be safe to call concurrently for
//! different members of the same set without client-side locking.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during sorted-set operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store command failed on '{key}': {reason}")]
    CommandFailed { key: String, reason: String },
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        let key = match &err {
            StoreError::CommandFailed { key, .. } => Some(key.clone()),
            StoreError::Unavailable(_) => None,
        };
        let domain = DomainError::new(ErrorCode::StoreError, err.to_string());
        match key {
            Some(key) => domain.with_detail("key", key),
            None => domain,
        }
    }
}

/// Port for a keyed collection of scored, unique members.
///
/// Members are strings; re-adding an existing member only updates its score.
#[async_trait]
pub trait SortedSetStore: Send + Sync {
    /// Returns true if `member` is in the set at `key`.
    async fn is_member(&self, key: &str, member: &str) -> Result<bool, StoreError>;

    /// Adds `member` with `score`, or updates the score of an existing member.
    async fn add(&self, key: &str, score: i64, member: &str) -> Result<(), StoreError>;

    /// Removes `member`. Removing an absent member succeeds.
    async fn remove(&self, key: &str, member: &str) -> Result<(), StoreError>;

    /// Returns every member ordered by ascending score.
    ///
    /// A missing key yields an empty vector.
    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SortedSetStore) {}

    #[test]
    fn store_error_maps_to_store_code() {
        let err: DomainError = StoreError::Unavailable("connection reset".to_string()).into();
        assert_eq!(err.code, ErrorCode::StoreError);
        assert!(err.message.contains("connection reset"));
    }

    #[test]
    fn command_failure_keeps_key_detail() {
        let err: DomainError = StoreError::CommandFailed {
            key: "cid:1:subscribed:uids".to_string(),
            reason: "WRONGTYPE".to_string(),
        }
        .into();
        assert_eq!(
            err.details.get("key"),
            Some(&"cid:1:subscribed:uids".to_string())
        );
    }
}
