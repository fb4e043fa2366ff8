//! Port doubles shared by application tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::adapters::InMemorySortedSetStore;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PluginSettings, SettingsReader, SortedSetStore, StoreError};

/// In-memory store that fails every command on selected keys.
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemorySortedSetStore,
    failing_keys: HashSet<String>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_key(mut self, key: &str) -> Self {
        self.failing_keys.insert(key.to_string());
        self
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        if self.failing_keys.contains(key) {
            return Err(StoreError::Unavailable(format!("injected failure on {}", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl SortedSetStore for FlakyStore {
    async fn is_member(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.check(key)?;
        self.inner.is_member(key, member).await
    }

    async fn add(&self, key: &str, score: i64, member: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.add(key, score, member).await
    }

    async fn remove(&self, key: &str, member: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.remove(key, member).await
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.check(key)?;
        self.inner.range_all(key).await
    }
}

/// Settings reader that always fails and counts its calls.
#[derive(Default)]
pub struct FailingSettings {
    pub calls: AtomicUsize,
}

#[async_trait]
impl SettingsReader for FailingSettings {
    async fn get(&self, _namespace: &str) -> Result<PluginSettings, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::new(ErrorCode::SettingsError, "settings unavailable"))
    }
}
