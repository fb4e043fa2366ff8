//! In-memory sorted-set store.
//!
//! Suitable for tests and single-process deployments. All mutations of one
//! key happen under a single write lock, which gives the same per-command
//! atomicity Redis provides.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::ports::{SortedSetStore, StoreError};

/// Sorted sets held in process memory.
#[derive(Default)]
pub struct InMemorySortedSetStore {
    sets: RwLock<HashMap<String, HashMap<String, i64>>>,
}

impl InMemorySortedSetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SortedSetStore for InMemorySortedSetStore {
    async fn is_member(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        Ok(self
            .sets
            .read()
            .await
            .get(key)
            .map_or(false, |set| set.contains_key(member)))
    }

    async fn add(&self, key: &str, score: i64, member: &str) -> Result<(), StoreError> {
        self.sets
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn remove(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut sets = self.sets.write().await;
        if let Some(set) = sets.get_mut(key) {
            set.remove(member);
            // Empty sets behave exactly like missing ones
            if set.is_empty() {
                sets.remove(key);
            }
        }
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let sets = self.sets.read().await;
        let Some(set) = sets.get(key) else {
            return Ok(Vec::new());
        };

        let mut members: Vec<(&String, &i64)> = set.iter().collect();
        // Redis orders equal scores lexicographically
        members.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        Ok(members.into_iter().map(|(m, _)| m.clone()).collect())
    }
}
