//! Error types for the domain layer.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Malformed input at a construction boundary.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

/// What failed, grouped by the collaborator responsible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidFormat,

    StoreError,
    SettingsError,
    NotificationError,
    EmailError,
    TicketingError,

    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::SettingsError => "SETTINGS_ERROR",
            ErrorCode::NotificationError => "NOTIFICATION_ERROR",
            ErrorCode::EmailError => "EMAIL_ERROR",
            ErrorCode::TicketingError => "TICKETING_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error carried across every port: a code, a message and string details
/// such as the store key or recipient involved.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(ErrorCode::ValidationFailed, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::empty_field("uid").to_string(),
            "Field 'uid' cannot be empty"
        );
        assert_eq!(
            ValidationError::invalid_format("cid", "not a number").to_string(),
            "Field 'cid' has invalid format: not a number"
        );
    }

    #[test]
    fn display_prefixes_code() {
        let err = DomainError::new(ErrorCode::StoreError, "connection refused");
        assert_eq!(err.to_string(), "[STORE_ERROR] connection refused");
    }

    #[test]
    fn details_are_looked_up_by_key() {
        let err = DomainError::new(ErrorCode::EmailError, "send failed")
            .with_detail("uid", "3")
            .with_detail("template", "categoryNotifications_post");

        assert_eq!(err.detail("uid"), Some("3"));
        assert_eq!(err.detail("template"), Some("categoryNotifications_post"));
        assert_eq!(err.detail("cid"), None);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: DomainError = ValidationError::invalid_format("pid", "bad").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("pid"));
    }
}
