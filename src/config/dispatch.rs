//! Dispatch configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound accepted for `email_concurrency`.
const MAX_EMAIL_CONCURRENCY: usize = 500;

/// Fan-out and settings lookup configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Maximum simultaneous email sends per dispatch
    #[serde(default = "default_email_concurrency")]
    pub email_concurrency: usize,

    /// Settings namespace holding the delivery mode
    #[serde(default = "default_settings_namespace")]
    pub settings_namespace: String,

    /// Log filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl DispatchConfig {
    /// Validate dispatch configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email_concurrency == 0 || self.email_concurrency > MAX_EMAIL_CONCURRENCY {
            return Err(ValidationError::InvalidEmailConcurrency(MAX_EMAIL_CONCURRENCY));
        }
        if self.settings_namespace.trim().is_empty() {
            return Err(ValidationError::EmptySettingsNamespace);
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            email_concurrency: default_email_concurrency(),
            settings_namespace: default_settings_namespace(),
            log_level: default_log_level(),
        }
    }
}

fn default_email_concurrency() -> usize {
    50
}

fn default_settings_namespace() -> String {
    "category-notifications".to_string()
}

fn default_log_level() -> String {
    "info,category_notifications=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.email_concurrency, 50);
        assert_eq!(config.settings_namespace, "category-notifications");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = DispatchConfig {
            email_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let config = DispatchConfig {
            email_concurrency: 10_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidEmailConcurrency(MAX_EMAIL_CONCURRENCY))
        );
    }

    #[test]
    fn test_blank_namespace_rejected() {
        let config = DispatchConfig {
            settings_namespace: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptySettingsNamespace));
    }
}
