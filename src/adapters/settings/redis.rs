//! Redis-backed settings reader.
//!
//! The forum persists plugin settings as a hash at `settings:{namespace}`;
//! the delivery mode is the `type` field.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PluginSettings, SettingsReader};

/// Reads plugin settings straight from Redis on every call.
#[derive(Clone)]
pub struct RedisSettingsReader {
    conn: MultiplexedConnection,
}

impl RedisSettingsReader {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

pub(crate) fn settings_key(namespace: &str) -> String {
    format!("settings:{}", namespace)
}

#[async_trait]
impl SettingsReader for RedisSettingsReader {
    async fn get(&self, namespace: &str) -> Result<PluginSettings, DomainError> {
        let key = settings_key(namespace);
        let mut conn = self.conn.clone();

        let delivery_type: Option<String> = conn.hget(&key, "type").await.map_err(|e| {
            DomainError::new(ErrorCode::SettingsError, e.to_string()).with_detail("key", key.clone())
        })?;

        Ok(PluginSettings { delivery_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_key_uses_namespace() {
        assert_eq!(
            settings_key("category-notifications"),
            "settings:category-notifications"
        );
    }
}
