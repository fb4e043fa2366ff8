//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Redis connect timeout must be at least one second")]
    InvalidRedisTimeout,

    #[error("Email concurrency must be between 1 and {0}")]
    InvalidEmailConcurrency(usize),

    #[error("Settings namespace cannot be empty")]
    EmptySettingsNamespace,

    #[error("Invalid site URL format")]
    InvalidSiteUrl,

    #[error("Ticketing endpoint must be an http(s) URL")]
    InvalidTicketingEndpoint,

    #[error("Invalid ticketing timeout")]
    InvalidTicketingTimeout,
}
