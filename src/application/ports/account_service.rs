use async_trait::async_trait;
use serde_json::Value;

/// Network-backed identity provider. Credentials and sessions are forwarded
/// opaquely; the raw provider payload comes back untouched.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Value, AccountError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Value, AccountError>;

    async fn sign_out(&self, access_token: Option<&str>) -> Result<Value, AccountError>;

    async fn current_user(&self, access_token: Option<&str>) -> Result<Value, AccountError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("provider request failed: {0}")]
    RequestFailed(String),
    #[error("provider rejected request: {0}")]
    Rejected(String),
    #[error("missing access token")]
    MissingToken,
}
