use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::tokens::AccessToken;
use crate::tokens::RefreshToken;
use crate::tokens::TokenPair;

/// Token minting coordinator.
///
/// Owns the signing handler and the configured lifetimes. Persistence is the
/// caller's concern: a sign-in flow saves what this issuer mints.
pub struct TokenIssuer {
    jwt: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `secret` - shared HS256 signing secret
    /// * `access_ttl_secs` - access token lifetime in seconds
    /// * `refresh_ttl_secs` - refresh token lifetime in seconds
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            jwt: JwtHandler::new(secret),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    /// The handler sharing this issuer's signing secret.
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Mint a signed access token for `user_id`.
    ///
    /// The token gets a fresh unique identifier and expires at
    /// `now + access_ttl`.
    ///
    /// # Errors
    /// * `Signing` - signing failed; no partially-populated token is returned
    pub fn issue_access_token(&self, user_id: &str) -> Result<AccessToken, JwtError> {
        let id = Uuid::new_v4().to_string();
        let issue_at = Utc::now();
        let expire_at = issue_at + self.access_ttl;

        let claims = AccessClaims::new(&id, user_id, issue_at, expire_at);
        let value = self.jwt.encode(&claims)?;

        Ok(AccessToken {
            id,
            value,
            user_id: user_id.to_string(),
            expire_at,
        })
    }

    /// Mint an opaque refresh token for `user_id`.
    ///
    /// A fresh unique identifier doubles as the token value; there is no
    /// signature to verify, only a store lookup.
    pub fn issue_refresh_token(&self, user_id: &str) -> RefreshToken {
        let id = Uuid::new_v4().to_string();
        let expire_at = Utc::now() + self.refresh_ttl;

        RefreshToken {
            value: id.clone(),
            id,
            user_id: user_id.to_string(),
            expire_at,
        }
    }

    /// Mint an access/refresh pair as one logical operation.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair, JwtError> {
        let access = self.issue_access_token(user_id)?;
        let refresh = self.issue_refresh_token(user_id);

        Ok(TokenPair { access, refresh })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_access_token_round_trips() {
        let issuer = TokenIssuer::new(SECRET, 600, 3600);

        let at = issuer.issue_access_token("user-1").expect("Failed to issue");
        assert!(!at.value.is_empty());
        assert_eq!(at.user_id, "user-1");

        let claims = issuer.jwt().decode(&at.value).expect("Failed to decode");
        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.token_id(), at.id);
        assert_eq!(claims.exp, at.expire_at.timestamp());
    }

    #[test]
    fn test_access_token_expiry_is_in_the_future() {
        let issuer = TokenIssuer::new(SECRET, 600, 3600);
        let before = Utc::now();

        let at = issuer.issue_access_token("user-1").unwrap();

        let elapsed = at.expire_at - before;
        assert!(elapsed.num_seconds() >= 599 && elapsed.num_seconds() <= 601);
    }

    #[test]
    fn test_refresh_token_is_opaque() {
        let issuer = TokenIssuer::new(SECRET, 600, 3600);

        let rt = issuer.issue_refresh_token("user-1");
        assert_eq!(rt.id, rt.value);
        assert_eq!(rt.user_id, "user-1");
        // An opaque value, not a signed structure.
        assert!(!rt.value.contains('.'));
    }

    #[test]
    fn test_issue_pair_mints_distinct_identifiers() {
        let issuer = TokenIssuer::new(SECRET, 600, 3600);

        let pair = issuer.issue_pair("user-1").expect("Failed to issue pair");
        assert_ne!(pair.access.id, pair.refresh.id);
        assert!(pair.refresh.expire_at > pair.access.expire_at);
    }
}
