use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use auth::AccessToken;
use auth::RefreshToken;

use crate::identity::errors::StoreError;
use crate::identity::models::User;
use crate::identity::ports::CredentialStore;

/// In-memory credential store.
///
/// Backs tests and local runs with the same contract as the persistent
/// backend. Nothing expires passively: an expired token record stays
/// visible until removed or explicitly swept, since expiry enforcement is
/// the token verifier's job.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
    access_tokens: RwLock<HashMap<String, AccessToken>>,
    refresh_tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweep expired token records, returning how many were removed.
    pub async fn reclaim_expired(&self) -> u64 {
        let now = Utc::now();
        let mut reclaimed = 0;

        let mut access = self.access_tokens.write().await;
        let before = access.len();
        access.retain(|_, t| t.expire_at > now);
        reclaimed += (before - access.len()) as u64;

        let mut refresh = self.refresh_tokens.write().await;
        let before = refresh.len();
        refresh.retain(|_, t| t.expire_at > now);
        reclaimed += (before - refresh.len()) as u64;

        reclaimed
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.id.as_str())
            || users.values().any(|u| u.username == user.username)
        {
            return Err(StoreError::Conflict(user.username.as_str().to_string()));
        }

        users.insert(user.id.to_string(), user.clone());
        Ok(())
    }

    async fn remove_user(&self, id: &str) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn get_access_token(&self, id: &str) -> Result<AccessToken, StoreError> {
        self.access_tokens
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_access_token(&self, token: &AccessToken) -> Result<(), StoreError> {
        self.access_tokens
            .write()
            .await
            .insert(token.id.clone(), token.clone());
        Ok(())
    }

    async fn remove_access_token(&self, id: &str) -> Result<(), StoreError> {
        self.access_tokens
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn get_refresh_token(&self, id: &str) -> Result<RefreshToken, StoreError> {
        self.refresh_tokens
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_refresh_token(&self, token: &RefreshToken) -> Result<(), StoreError> {
        self.refresh_tokens
            .write()
            .await
            .insert(token.id.clone(), token.clone());
        Ok(())
    }

    async fn remove_refresh_token(&self, id: &str) -> Result<(), StoreError> {
        self.refresh_tokens
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn close(&self) {}
}
