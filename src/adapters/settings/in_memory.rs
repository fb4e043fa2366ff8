//! In-memory settings reader.
//!
//! Holds plugin settings per namespace; writes are visible to the next read,
//! which is how admin changes to the delivery mode take effect live.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{PluginSettings, SettingsReader};

/// Settings snapshot shared between an admin surface and the dispatchers.
#[derive(Default)]
pub struct InMemorySettingsReader {
    namespaces: RwLock<HashMap<String, PluginSettings>>,
}

impl InMemorySettingsReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with one namespace already populated.
    pub fn with_settings(namespace: impl Into<String>, settings: PluginSettings) -> Self {
        let mut namespaces = HashMap::new();
        namespaces.insert(namespace.into(), settings);
        Self {
            namespaces: RwLock::new(namespaces),
        }
    }

    /// Replaces the settings of a namespace.
    pub async fn set(&self, namespace: impl Into<String>, settings: PluginSettings) {
        self.namespaces
            .write()
            .await
            .insert(namespace.into(), settings);
    }
}

#[async_trait]
impl SettingsReader for InMemorySettingsReader {
    async fn get(&self, namespace: &str) -> Result<PluginSettings, DomainError> {
        Ok(self
            .namespaces
            .read()
            .await
            .get(namespace)
            .cloned()
            .unwrap_or_default())
    }
}
