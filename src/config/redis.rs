//! Redis connection settings

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where subscriber sets, the category list and plugin settings live
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Connection URL (`redis://` or `rediss://`)
    pub url: String,

    /// Seconds to wait for the initial connection
    #[serde(default = "default_connect_timeout")]
    pub timeout_secs: u64,
}

impl RedisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the URL scheme and that the timeout is non-zero
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidRedisTimeout);
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    5
}
