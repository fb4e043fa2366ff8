//! Configuration for the notification core
//!
//! Values come from an optional TOML/YAML/JSON file overlaid by environment
//! variables prefixed `CATEGORY_NOTIFICATIONS`, with `__` between nesting
//! levels. A `.env` file in the working directory is read first.
//!
//! ```no_run
//! use category_notifications::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! println!("Sending at most {} emails at once", config.dispatch.email_concurrency);
//! ```

mod dispatch;
mod error;
mod redis;
mod site;
mod ticketing;

pub use dispatch::DispatchConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use site::SiteConfig;
pub use ticketing::TicketingConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "CATEGORY_NOTIFICATIONS";

/// Every setting the notification core reads at startup
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Subscription sets, category list, plugin settings
    pub redis: RedisConfig,

    /// Forum identity used in emails
    pub site: SiteConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Disabled unless an endpoint is set
    #[serde(default)]
    pub ticketing: TicketingConfig,
}

impl AppConfig {
    /// Reads configuration from the environment only.
    ///
    /// `CATEGORY_NOTIFICATIONS__REDIS__URL=redis://...` sets `redis.url`,
    /// `CATEGORY_NOTIFICATIONS__DISPATCH__EMAIL_CONCURRENCY=20` sets
    /// `dispatch.email_concurrency`, and so on.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a required value is missing or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Like [`AppConfig::load`], with `path` as a base layer the environment
    /// overrides. A missing file is not an error.
    pub fn load_with_file(path: &str) -> Result<Self, ConfigError> {
        Self::build(Some(path))
    }

    fn build(path: Option<&str>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Runs every section's checks, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.redis.validate()?;
        self.site.validate()?;
        self.dispatch.validate()?;
        self.ticketing.validate()
    }
}
