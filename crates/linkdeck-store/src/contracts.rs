// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use linkdeck_model::{Configuration, User, Username};

use crate::error::StoreError;

/// Persisted account document: the public [`User`] plus credential
/// material. Emails are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UserRecord {
    pub user: User,
    pub password_salt: String,
    pub password_hash: String,
}

/// Document store keyed by username. `fetch_*` report an absent key with
/// [`crate::StoreErrorCode::NotFound`]; `put_*` overwrite unconditionally.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    async fn fetch_config(&self, username: &Username) -> Result<Configuration, StoreError>;
    async fn put_config(
        &self,
        username: &Username,
        config: &Configuration,
    ) -> Result<(), StoreError>;
    async fn config_exists(&self, username: &Username) -> Result<bool, StoreError>;

    async fn fetch_user(&self, username: &Username) -> Result<UserRecord, StoreError>;
    async fn fetch_user_by_email(&self, email: &str) -> Result<UserRecord, StoreError>;
    async fn put_user(&self, record: &UserRecord) -> Result<(), StoreError>;
}
