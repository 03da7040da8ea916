use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{AccountError, AccountService};

/// Counting account service for router tests; lets tests assert that
/// validation failures never reach the provider.
#[derive(Default)]
pub struct MockAccountService {
    pub sign_up_calls: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
    pub current_user_calls: AtomicUsize,
}

impl MockAccountService {
    pub fn total_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
            + self.sign_in_calls.load(Ordering::SeqCst)
            + self.sign_out_calls.load(Ordering::SeqCst)
            + self.current_user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountService for MockAccountService {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<Value, AccountError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "user": { "email": email } }))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Value, AccountError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "access_token": "mock-token", "user": { "email": email } }))
    }

    async fn sign_out(&self, access_token: Option<&str>) -> Result<Value, AccountError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        access_token.ok_or(AccountError::MissingToken)?;
        Ok(Value::Null)
    }

    async fn current_user(&self, access_token: Option<&str>) -> Result<Value, AccountError> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        access_token.ok_or(AccountError::MissingToken)?;
        Ok(json!({ "email": "user@example.com" }))
    }
}

/// Account service that rejects every call, for the provider-failure path.
pub struct RejectingAccountService;

#[async_trait]
impl AccountService for RejectingAccountService {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Value, AccountError> {
        Err(AccountError::Rejected("email already registered".to_string()))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Value, AccountError> {
        Err(AccountError::Rejected("invalid credentials".to_string()))
    }

    async fn sign_out(&self, _access_token: Option<&str>) -> Result<Value, AccountError> {
        Err(AccountError::Rejected("session not found".to_string()))
    }

    async fn current_user(&self, _access_token: Option<&str>) -> Result<Value, AccountError> {
        Err(AccountError::Rejected("session not found".to_string()))
    }
}
