use async_trait::async_trait;

use crate::domain::{NewUser, UserRecord};

/// Document-store backed user persistence for the alternate `/users/` flow.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserRecord>, RepositoryError>;

    /// Inserts the document and returns the generated identifier.
    async fn insert(&self, user: &NewUser) -> Result<String, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}
