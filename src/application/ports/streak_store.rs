use std::time::Duration;

use async_trait::async_trait;

/// Key-value store used for the per-user streak counter.
#[async_trait]
pub trait StreakStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(
        &self,
        key: &str,
        value: &str,
        expiry: Option<Duration>,
    ) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}
