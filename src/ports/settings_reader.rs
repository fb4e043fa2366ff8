//! SettingsReader port - Interface for the forum's plugin settings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Settings stored under the category notifications namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Raw delivery mode value. Interpreted by `ResolvedMode::from_setting`.
    #[serde(rename = "type", default)]
    pub delivery_type: Option<String>,
}

impl PluginSettings {
    pub fn with_type(value: impl Into<String>) -> Self {
        Self {
            delivery_type: Some(value.into()),
        }
    }
}

/// Port for reading a settings namespace.
///
/// Implementations must not cache: every call reflects the live value.
#[async_trait]
pub trait SettingsReader: Send + Sync {
    async fn get(&self, namespace: &str) -> Result<PluginSettings, DomainError>;
}
