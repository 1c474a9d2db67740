// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use linkdeck_model::Username;

use crate::auth::sha256_hex;

struct SessionEntry {
    username: Username,
    issued_at: Instant,
}

/// Explicit session lifecycle: created at login, destroyed at logout or
/// after the TTL. Tokens are opaque; expired entries are purged on access.
pub struct SessionManager {
    ttl: Duration,
    seed: AtomicU64,
    entries: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            seed: AtomicU64::new(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn issue(&self, username: &Username) -> String {
        let counter = self.seed.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let token = sha256_hex(format!("session:{counter}:{nanos}:{username}").as_bytes());
        let mut entries = self.entries.write().await;
        entries.insert(
            token.clone(),
            SessionEntry {
                username: username.clone(),
                issued_at: Instant::now(),
            },
        );
        token
    }

    pub async fn resolve(&self, token: &str) -> Option<Username> {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.issued_at.elapsed() < self.ttl);
        entries.get(token).map(|entry| entry.username.clone())
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.entries.write().await.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username(raw: &str) -> Username {
        Username::parse(raw).expect("username")
    }

    #[tokio::test]
    async fn issued_tokens_resolve_to_their_owner() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let token = sessions.issue(&username("nitesh")).await;
        assert_eq!(sessions.resolve(&token).await, Some(username("nitesh")));
        assert_eq!(sessions.resolve("unknown-token").await, None);
    }

    #[tokio::test]
    async fn tokens_are_unique_per_issue() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let a = sessions.issue(&username("nitesh")).await;
        let b = sessions.issue(&username("nitesh")).await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn revoked_tokens_stop_resolving() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let token = sessions.issue(&username("nitesh")).await;
        assert!(sessions.revoke(&token).await);
        assert!(!sessions.revoke(&token).await);
        assert_eq!(sessions.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn expired_tokens_are_purged_on_access() {
        let sessions = SessionManager::new(Duration::ZERO);
        let token = sessions.issue(&username("nitesh")).await;
        assert_eq!(sessions.resolve(&token).await, None);
    }
}
