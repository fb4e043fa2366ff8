//! Delivery mode definitions.
//!
//! The site-wide setting that decides which channels fire for a new topic
//! or reply.

use serde::{Deserialize, Serialize};

/// Channel selection for category notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// In-app notification only.
    Notification,
    /// Email only. Used when the setting is missing or empty.
    #[default]
    Email,
    /// Email and in-app notification.
    Both,
}

impl DeliveryMode {
    /// Returns the setting value for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Notification => "notification",
            DeliveryMode::Email => "email",
            DeliveryMode::Both => "both",
        }
    }

    /// Returns true if this mode sends in-app notifications.
    pub fn sends_notification(&self) -> bool {
        matches!(self, DeliveryMode::Notification | DeliveryMode::Both)
    }

    /// Returns true if this mode sends email.
    pub fn sends_email(&self) -> bool {
        matches!(self, DeliveryMode::Email | DeliveryMode::Both)
    }
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of reading the delivery mode setting.
///
/// Values other than the three known modes are kept verbatim. They select
/// no channel at all: the event is dropped silently rather than falling
/// back to a default mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMode {
    Known(DeliveryMode),
    Unrecognized(String),
}

impl ResolvedMode {
    /// Interprets a raw `type` setting value.
    ///
    /// Missing or empty values resolve to [`DeliveryMode::Email`]. Matching is
    /// exact, so `"Email"` is unrecognized.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None | Some("") => ResolvedMode::Known(DeliveryMode::default()),
            Some("notification") => ResolvedMode::Known(DeliveryMode::Notification),
            Some("email") => ResolvedMode::Known(DeliveryMode::Email),
            Some("both") => ResolvedMode::Known(DeliveryMode::Both),
            Some(other) => ResolvedMode::Unrecognized(other.to_string()),
        }
    }

    /// Returns the delivery mode, if recognized.
    pub fn mode(&self) -> Option<DeliveryMode> {
        match self {
            ResolvedMode::Known(mode) => Some(*mode),
            ResolvedMode::Unrecognized(_) => None,
        }
    }
}
