//! HTTP ticketing notifier.
//!
//! Announces new topics to an external ticketing service with a bodyless
//! `POST {endpoint}?username=..&ticketName=..&categoryName=..`. The request
//! runs on its own task; a 200 response body is logged at `info`, anything
//! else at `warn`. Nothing is reported back to the caller.

use std::time::Duration;

use crate::config::TicketingConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::notifications::TicketNotice;
use crate::ports::TicketNotifier;

/// Fire-and-forget notifier for one configured endpoint.
#[derive(Clone)]
pub struct HttpTicketNotifier {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpTicketNotifier {
    /// Create a notifier posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::TicketingError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
        })
    }

    /// Builds a notifier from configuration; `None` when no endpoint is set.
    pub fn from_config(config: &TicketingConfig) -> Result<Option<Self>, DomainError> {
        match config.endpoint.as_deref().filter(|e| !e.is_empty()) {
            Some(endpoint) => Self::new(endpoint, config.timeout()).map(Some),
            None => Ok(None),
        }
    }

    async fn post(&self, notice: &TicketNotice) -> Result<String, DomainError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .query(notice)
            .send()
            .await
            .map_err(|e| DomainError::new(ErrorCode::TicketingError, e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DomainError::new(
                ErrorCode::TicketingError,
                format!("Ticketing endpoint returned {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::new(ErrorCode::TicketingError, e.to_string()))
    }
}

impl TicketNotifier for HttpTicketNotifier {
    fn notify(&self, notice: TicketNotice) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, dropping ticket notice");
            return;
        };

        let notifier = self.clone();
        runtime.spawn(async move {
            match notifier.post(&notice).await {
                Ok(body) => tracing::info!(response = %body, "Ticketing endpoint accepted notice"),
                Err(e) => tracing::warn!(
                    error = %e,
                    ticket = %notice.ticket_name,
                    "Ticketing notice failed"
                ),
            }
        });
    }
}
