//! Production wiring from [`AppConfig`].
//!
//! Subscriptions, settings and the category listing live in Redis; the
//! host forum supplies the notification and email services.

use std::sync::Arc;

use crate::adapters::store::connect;
use crate::adapters::{HttpTicketNotifier, RedisSettingsReader, RedisSortedSetStore, StoreCategoryLister};
use crate::application::{CategoryNotifications, DispatchOptions, NotificationPorts};
use crate::config::AppConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EmailSender, NotificationService, SortedSetStore, TicketNotifier};

/// Validates `config`, connects to Redis and builds the notification core.
///
/// # Errors
///
/// Returns an error for invalid configuration, an unreachable Redis, or a
/// ticketing client that cannot be built.
pub async fn build_from_config(
    config: &AppConfig,
    notifications: Arc<dyn NotificationService>,
    email: Arc<dyn EmailSender>,
) -> Result<CategoryNotifications, DomainError> {
    config
        .validate()
        .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;

    let conn = connect(&config.redis).await?;
    let store: Arc<dyn SortedSetStore> = Arc::new(RedisSortedSetStore::new(conn.clone()));
    let tickets = HttpTicketNotifier::from_config(&config.ticketing)?
        .map(|notifier| Arc::new(notifier) as Arc<dyn TicketNotifier>);

    tracing::info!(
        email_concurrency = config.dispatch.email_concurrency,
        ticketing = tickets.is_some(),
        "Category notifications connected"
    );

    let ports = NotificationPorts {
        categories: Arc::new(StoreCategoryLister::new(Arc::clone(&store))),
        store,
        settings: Arc::new(RedisSettingsReader::new(conn)),
        notifications,
        email,
        tickets,
    };
    Ok(CategoryNotifications::new(ports, DispatchOptions::from_config(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RecordingEmailSender, RecordingNotificationService};
    use crate::config::{DispatchConfig, RedisConfig, SiteConfig, TicketingConfig};

    #[tokio::test]
    async fn invalid_config_is_rejected_before_connecting() {
        let config = AppConfig {
            redis: RedisConfig {
                url: "http://not-redis".to_string(),
                timeout_secs: 1,
            },
            site: SiteConfig {
                title: "NodeBB".to_string(),
                url: "https://forum.example.com".to_string(),
            },
            dispatch: DispatchConfig::default(),
            ticketing: TicketingConfig::default(),
        };

        let err = build_from_config(
            &config,
            Arc::new(RecordingNotificationService::new()),
            Arc::new(RecordingEmailSender::new()),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
