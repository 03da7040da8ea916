use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    RepositoryError, StoreError, StreakStore, UserRepository,
};
use crate::domain::{NewUser, UserRecord};

/// In-memory key-value store standing in for Redis in tests.
#[derive(Default)]
pub struct MockStreakStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl StreakStore for MockStreakStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        _expiry: Option<Duration>,
    ) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory user repository keyed by username.
#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl MockUserRepository {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<String, RepositoryError> {
        let record = UserRecord::from_new(user);
        let id = record.id.clone();
        self.users
            .lock()
            .unwrap()
            .insert(user.username.clone(), record);
        Ok(id)
    }
}
