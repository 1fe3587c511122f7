use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenPair;

use crate::identity::errors::AuthError;
use crate::identity::errors::StoreError;
use crate::identity::models::User;
use crate::identity::models::UserInfo;
use crate::identity::ports::CredentialStore;

/// Domain service for the credential lifecycle.
///
/// Explicitly constructed with its store and issuer; no ambient global
/// state. One instance is shared across requests behind an `Arc`.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
}

impl AuthService {
    /// Create a new service with injected dependencies.
    pub fn new(store: Arc<dyn CredentialStore>, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            issuer,
        }
    }

    /// Authenticate a username/password pair and mint a token pair.
    ///
    /// A missing user and a wrong password both surface as
    /// `InvalidCredentials`; callers must not be able to tell them apart.
    /// Both minted tokens are persisted as part of the same logical
    /// operation: if either save fails, the sign-in fails as a whole and no
    /// credential is returned.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown username, wrong password, or empty input
    /// * `Token` - signing failed
    /// * `Store` - persistence failed
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, TokenPair), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = match self.store.get_user_by_username(username).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(AuthError::Store(e)),
        };

        if !self.hasher.verify(&user.password_hash, password, &user.salt) {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.issuer.issue_pair(user.id.as_str())?;

        self.store
            .save_access_token(&pair.access)
            .await
            .map_err(AuthError::Store)?;
        self.store
            .save_refresh_token(&pair.refresh)
            .await
            .map_err(AuthError::Store)?;

        tracing::info!(user_id = %user.id, access_token_id = %pair.access.id, "User signed in");

        Ok((user, pair))
    }

    /// Revoke the access token named by a presented token value.
    ///
    /// The value is decoded WITHOUT verification: possession was already
    /// proved by presenting it, and full validation is unnecessary to delete
    /// a record. Removing an already-removed token succeeds silently.
    ///
    /// # Errors
    /// * `Token` - the value is not a decodable token
    /// * `Store` - removal failed for a reason other than absence
    pub async fn sign_out(&self, access_token_value: &str) -> Result<(), AuthError> {
        let claims = self.issuer.jwt().decode_unverified(access_token_value)?;

        match self.store.remove_access_token(claims.token_id()).await {
            Ok(()) | Err(StoreError::NotFound) => {
                tracing::info!(access_token_id = %claims.token_id(), "Access token revoked");
                Ok(())
            }
            Err(e) => Err(AuthError::Store(e)),
        }
    }

    /// Resolve a verified token's user against the store.
    ///
    /// The middleware cross-check: a `NotFound` here means a deleted user
    /// must lose access immediately, however much lifetime the token has
    /// left.
    pub async fn authorized_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.store.get_user(user_id).await
    }

    /// Public projection of a user for downstream handlers.
    ///
    /// # Errors
    /// * `InvalidCredentials` - the user no longer exists
    /// * `Store` - lookup failed
    pub async fn user_info(&self, user_id: &str) -> Result<UserInfo, AuthError> {
        match self.store.get_user(user_id).await {
            Ok(user) => Ok(UserInfo::from(&user)),
            Err(StoreError::NotFound) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(AuthError::Store(e)),
        }
    }
}
