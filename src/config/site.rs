//! Site configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::notifications::SiteInfo;

/// Forum identity used in outgoing emails
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site title shown in email headers
    #[serde(default = "default_title")]
    pub title: String,

    /// Public base URL of the forum
    pub url: String,
}

impl SiteConfig {
    /// Values passed to email templates
    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            title: self.title.clone(),
            url: self.url.trim_end_matches('/').to_string(),
        }
    }

    /// Validate site configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("SITE__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidSiteUrl);
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            url: String::new(),
        }
    }
}

fn default_title() -> String {
    "NodeBB".to_string()
}
