use async_trait::async_trait;

use auth::AccessToken;
use auth::RefreshToken;

use crate::identity::errors::StoreError;
use crate::identity::models::User;

/// Persistence contract backing the credential lifecycle.
///
/// A capability set over users and token records, implemented once per
/// backend. Lookups that miss fail with `StoreError::NotFound`; a colliding
/// unique key on `save_user` fails with `StoreError::Conflict` and never
/// silently overwrites.
///
/// Token records carry their own expiry and the backing store eventually
/// reclaims expired ones, but an expired-but-unreclaimed token is still
/// returned by the getters: expiry enforcement is the token verifier's job,
/// not the store's.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a user by identifier.
    async fn get_user(&self, id: &str) -> Result<User, StoreError>;

    /// Retrieve a user by unique username.
    async fn get_user_by_username(&self, username: &str) -> Result<User, StoreError>;

    /// Persist a new user. Both the identifier and the username are unique.
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;

    /// Remove a user by identifier.
    async fn remove_user(&self, id: &str) -> Result<(), StoreError>;

    /// Retrieve an access token record by identifier.
    async fn get_access_token(&self, id: &str) -> Result<AccessToken, StoreError>;

    /// Persist an access token record.
    async fn save_access_token(&self, token: &AccessToken) -> Result<(), StoreError>;

    /// Remove an access token record by identifier.
    async fn remove_access_token(&self, id: &str) -> Result<(), StoreError>;

    /// Retrieve a refresh token record by identifier.
    async fn get_refresh_token(&self, id: &str) -> Result<RefreshToken, StoreError>;

    /// Persist a refresh token record.
    async fn save_refresh_token(&self, token: &RefreshToken) -> Result<(), StoreError>;

    /// Remove a refresh token record by identifier.
    async fn remove_refresh_token(&self, id: &str) -> Result<(), StoreError>;

    /// Tear down the backing connection.
    async fn close(&self);
}
