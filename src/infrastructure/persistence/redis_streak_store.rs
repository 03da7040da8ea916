use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::application::ports::{StoreError, StreakStore};

/// Redis-backed streak counter store.
pub struct RedisStreakStore {
    client: redis::Client,
}

impl RedisStreakStore {
    pub fn new(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::ConnectionFailed(format!("invalid URL: {}", e)))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))
    }
}

#[async_trait]
impl StreakStore for RedisStreakStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        conn.get(key)
            .await
            .map_err(|e| StoreError::CommandFailed(format!("GET failed: {}", e)))
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        expiry: Option<Duration>,
    ) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        match expiry {
            Some(ttl) => conn
                .set_ex(key, value, ttl.as_secs())
                .await
                .map_err(|e| StoreError::CommandFailed(format!("SETEX failed: {}", e))),
            None => conn
                .set(key, value)
                .await
                .map_err(|e| StoreError::CommandFailed(format!("SET failed: {}", e))),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.del(key)
            .await
            .map_err(|e| StoreError::CommandFailed(format!("DEL failed: {}", e)))
    }
}
