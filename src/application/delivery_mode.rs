//! DeliveryModeResolver - Reads the live delivery mode setting.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::notifications::ResolvedMode;
use crate::ports::SettingsReader;

/// Resolves the delivery mode from the plugin settings namespace.
///
/// Never caches: each event sees the setting as it is at that moment.
pub struct DeliveryModeResolver {
    settings: Arc<dyn SettingsReader>,
    namespace: String,
}

impl DeliveryModeResolver {
    pub fn new(settings: Arc<dyn SettingsReader>, namespace: impl Into<String>) -> Self {
        Self {
            settings,
            namespace: namespace.into(),
        }
    }

    /// Reads and interprets the `type` setting.
    ///
    /// # Errors
    ///
    /// Returns the settings reader's error unchanged.
    pub async fn resolve_mode(&self) -> Result<ResolvedMode, DomainError> {
        let settings = self.settings.get(&self.namespace).await?;
        Ok(ResolvedMode::from_setting(settings.delivery_type.as_deref()))
    }
}
