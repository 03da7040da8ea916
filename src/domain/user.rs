use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user document about to be inserted into the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl NewUser {
    pub fn new(username: String) -> Self {
        Self {
            username,
            email: None,
            display_name: None,
        }
    }
}

/// A user document as read back from the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserRecord {
    pub fn from_new(user: &NewUser) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
        }
    }
}
