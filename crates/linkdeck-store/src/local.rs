// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use linkdeck_model::{Configuration, Username};

use crate::contracts::{ProfileStore, UserRecord};
use crate::error::{StoreError, StoreErrorCode};

const CONFIGS_DIR: &str = "configs";
const USERS_DIR: &str = "users";

/// One JSON document per key under `configs/` and `users/`. Writes land in
/// a temp file, are synced, then renamed over the target; readers never
/// observe a torn document.
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn config_path(&self, username: &Username) -> PathBuf {
        self.root
            .join(CONFIGS_DIR)
            .join(format!("{}.json", username.as_str()))
    }

    fn user_path(&self, username: &Username) -> PathBuf {
        self.root
            .join(USERS_DIR)
            .join(format!("{}.json", username.as_str()))
    }

    fn write_document(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = path
            .parent()
            .ok_or_else(|| StoreError::new(StoreErrorCode::Internal, "document path has no parent"))?;
        fs::create_dir_all(dir).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        write_and_sync(&tmp, bytes)?;
        fs::rename(&tmp, path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        sync_dir(dir)?;
        Ok(())
    }

    fn read_document(&self, path: &Path, what: &str) -> Result<Vec<u8>, StoreError> {
        if !path.exists() {
            return Err(StoreError::not_found(format!("{what} missing")));
        }
        fs::read(path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file =
        File::create(path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    file.write_all(bytes)
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    file.sync_all()
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    Ok(())
}

fn sync_dir(dir: &Path) -> Result<(), StoreError> {
    let handle =
        File::open(dir).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    handle
        .sync_all()
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))
}

#[async_trait]
impl ProfileStore for LocalFsStore {
    async fn fetch_config(&self, username: &Username) -> Result<Configuration, StoreError> {
        let raw = self.read_document(&self.config_path(username), "configuration")?;
        serde_json::from_slice(&raw)
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))
    }

    async fn put_config(
        &self,
        username: &Username,
        config: &Configuration,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(config)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        self.write_document(&self.config_path(username), &bytes)?;
        debug!(username = %username, "configuration written");
        Ok(())
    }

    async fn config_exists(&self, username: &Username) -> Result<bool, StoreError> {
        Ok(self.config_path(username).exists())
    }

    async fn fetch_user(&self, username: &Username) -> Result<UserRecord, StoreError> {
        let raw = self.read_document(&self.user_path(username), "user")?;
        serde_json::from_slice(&raw)
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        let users_dir = self.root.join(USERS_DIR);
        if !users_dir.exists() {
            return Err(StoreError::not_found("user missing"));
        }
        let entries = fs::read_dir(&users_dir)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw =
                fs::read(&path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
            let record: UserRecord = serde_json::from_slice(&raw)
                .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
            if record.user.email.eq_ignore_ascii_case(email) {
                return Ok(record);
            }
        }
        Err(StoreError::not_found("user missing"))
    }

    async fn put_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        self.write_document(&self.user_path(&record.user.username), &bytes)
    }
}
