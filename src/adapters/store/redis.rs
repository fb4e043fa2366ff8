//! Redis-backed sorted-set store for production deployments.
//!
//! Maps the port one-to-one onto Redis commands:
//! `ZSCORE` (membership), `ZADD`, `ZREM`, and `ZRANGE key 0 -1`.
//! Each command is atomic on the server, so concurrent subscribes from
//! several web nodes cannot corrupt a set.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::config::RedisConfig;
use crate::ports::{SortedSetStore, StoreError};

/// Opens a multiplexed connection, bounded by the configured timeout.
pub async fn connect(config: &RedisConfig) -> Result<MultiplexedConnection, StoreError> {
    let client = redis::Client::open(config.url.as_str())
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    match tokio::time::timeout(config.timeout(), client.get_multiplexed_tokio_connection()).await {
        Ok(conn) => conn.map_err(|e| StoreError::Unavailable(e.to_string())),
        Err(_) => Err(StoreError::Unavailable(format!(
            "connection timed out after {}s",
            config.timeout_secs
        ))),
    }
}

/// Sorted-set store on a shared Redis connection.
#[derive(Clone)]
pub struct RedisSortedSetStore {
    conn: MultiplexedConnection,
}

impl RedisSortedSetStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

fn command_failed(key: &str) -> impl FnOnce(redis::RedisError) -> StoreError + '_ {
    move |e| {
        if e.is_io_error() || e.is_connection_dropped() || e.is_timeout() {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::CommandFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl SortedSetStore for RedisSortedSetStore {
    async fn is_member(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let score: Option<f64> = conn.zscore(key, member).await.map_err(command_failed(key))?;
        Ok(score.is_some())
    }

    async fn add(&self, key: &str, score: i64, member: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.zadd::<_, _, _, ()>(key, member, score)
            .await
            .map_err(command_failed(key))
    }

    async fn remove(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.zrem::<_, _, ()>(key, member)
            .await
            .map_err(command_failed(key))
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.zrange(key, 0, -1).await.map_err(command_failed(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = command_failed("cid:1:subscribed:uids")(redis::RedisError::from(io));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn server_errors_keep_the_key() {
        let server = redis::RedisError::from((redis::ErrorKind::TypeError, "WRONGTYPE"));
        let err = command_failed("cid:1:subscribed:uids")(server);
        match err {
            StoreError::CommandFailed { key, .. } => assert_eq!(key, "cid:1:subscribed:uids"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            connect(&config).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
