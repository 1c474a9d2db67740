// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use linkdeck_model::{Configuration, Username};

use crate::contracts::{ProfileStore, UserRecord};
use crate::error::StoreError;

/// In-memory backend for tests and local demos. Same contract as
/// [`crate::LocalFsStore`], no durability.
#[derive(Default)]
pub struct MemoryStore {
    configs: Mutex<HashMap<Username, Configuration>>,
    users: Mutex<HashMap<Username, UserRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch_config(&self, username: &Username) -> Result<Configuration, StoreError> {
        self.configs
            .lock()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::not_found("configuration missing"))
    }

    async fn put_config(
        &self,
        username: &Username,
        config: &Configuration,
    ) -> Result<(), StoreError> {
        self.configs
            .lock()
            .await
            .insert(username.clone(), config.clone());
        Ok(())
    }

    async fn config_exists(&self, username: &Username) -> Result<bool, StoreError> {
        Ok(self.configs.lock().await.contains_key(username))
    }

    async fn fetch_user(&self, username: &Username) -> Result<UserRecord, StoreError> {
        self.users
            .lock()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user missing"))
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        self.users
            .lock()
            .await
            .values()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or_else(|| StoreError::not_found("user missing"))
    }

    async fn put_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        self.users
            .lock()
            .await
            .insert(record.user.username.clone(), record.clone());
        Ok(())
    }
}
