//! Ticketing integration configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Outbound ticketing notifier configuration
///
/// The integration is disabled unless `endpoint` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketingConfig {
    /// Full URL that receives new-topic notices via POST
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TicketingConfig {
    /// Returns true if a ticketing endpoint is configured.
    pub fn is_enabled(&self) -> bool {
        self.endpoint.as_deref().map_or(false, |e| !e.is_empty())
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate ticketing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.is_empty()) {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidTicketingEndpoint);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTicketingTimeout);
        }
        Ok(())
    }
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let config = TicketingConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_endpoint_is_disabled() {
        let config = TicketingConfig {
            endpoint: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let config = TicketingConfig {
            endpoint: Some("ftp://tickets.local/api".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTicketingEndpoint));
    }

    #[test]
    fn test_valid_endpoint() {
        let config = TicketingConfig {
            endpoint: Some("http://localhost:7070/RMT/email/ticket".to_string()),
            ..Default::default()
        };
        assert!(config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_timeout() {
        let config = TicketingConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTicketingTimeout));
    }
}
