use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{AccountError, AccountService};

/// Supabase GoTrue REST adapter. Sessions are the caller's concern: sign-out
/// and current-user forward the caller's bearer token instead of holding
/// client-side session state.
pub struct SupabaseAccountService {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAccountService {
    pub fn new(client: reqwest::Client, base_url: String, anon_key: String) -> Self {
        Self {
            client,
            base_url,
            anon_key,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn read_payload(response: reqwest::Response) -> Result<Value, AccountError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AccountError::Rejected(format!("status {}: {}", status, body)));
        }

        // GoTrue answers 204 with an empty body on logout.
        let text = response
            .text()
            .await
            .map_err(|e| AccountError::RequestFailed(format!("body: {}", e)))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AccountError::RequestFailed(format!("body: {}", e)))
    }
}

#[async_trait]
impl AccountService for SupabaseAccountService {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Value, AccountError> {
        let response = self
            .client
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AccountError::RequestFailed(e.to_string()))?;

        Self::read_payload(response).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Value, AccountError> {
        let response = self
            .client
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AccountError::RequestFailed(e.to_string()))?;

        Self::read_payload(response).await
    }

    async fn sign_out(&self, access_token: Option<&str>) -> Result<Value, AccountError> {
        let token = access_token.ok_or(AccountError::MissingToken)?;

        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AccountError::RequestFailed(e.to_string()))?;

        Self::read_payload(response).await
    }

    async fn current_user(&self, access_token: Option<&str>) -> Result<Value, AccountError> {
        let token = access_token.ok_or(AccountError::MissingToken)?;

        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AccountError::RequestFailed(e.to_string()))?;

        Self::read_payload(response).await
    }
}
