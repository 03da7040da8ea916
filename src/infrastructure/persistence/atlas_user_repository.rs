use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{NewUser, UserRecord};

/// User repository over the MongoDB Atlas data API (`findOne`/`insertOne`
/// actions against the users collection).
pub struct AtlasUserRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    data_source: String,
    database: String,
}

const USERS_COLLECTION: &str = "users";

impl AtlasUserRepository {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        api_key: String,
        data_source: String,
        database: String,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            data_source,
            database,
        }
    }

    async fn action(&self, action: &str, body: Value) -> Result<Value, RepositoryError> {
        let url = format!("{}/action/{}", self.base_url, action);

        let mut payload = json!({
            "dataSource": self.data_source,
            "database": self.database,
            "collection": USERS_COLLECTION,
        });
        merge_fields(&mut payload, body);

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RepositoryError::QueryFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("body: {}", e)))
    }
}

fn merge_fields(target: &mut Value, extra: Value) {
    if let (Some(target_map), Value::Object(extra_map)) = (target.as_object_mut(), extra) {
        target_map.extend(extra_map);
    }
}

#[async_trait]
impl UserRepository for AtlasUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let result = self
            .action("findOne", json!({ "filter": { "username": username } }))
            .await?;

        match result.get("document") {
            None | Some(Value::Null) => Ok(None),
            Some(document) => {
                let record = serde_json::from_value(document.clone())
                    .map_err(|e| RepositoryError::QueryFailed(format!("document: {}", e)))?;
                Ok(Some(record))
            }
        }
    }

    async fn insert(&self, user: &NewUser) -> Result<String, RepositoryError> {
        let record = UserRecord::from_new(user);
        let document = serde_json::to_value(&record)
            .map_err(|e| RepositoryError::QueryFailed(format!("serialize: {}", e)))?;

        let result = self
            .action("insertOne", json!({ "document": document }))
            .await?;

        // The data API echoes the stored id; fall back to the one we minted.
        let inserted_id = result
            .get("insertedId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(record.id);

        tracing::info!(username = %user.username, "User document inserted");

        Ok(inserted_id)
    }
}
