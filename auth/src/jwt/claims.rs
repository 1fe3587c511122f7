use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer embedded in every access token.
pub const ISSUER: &str = "identity-service";

/// Subject marker distinguishing access tokens from other signed material.
pub const SUBJECT: &str = "Access token";

/// Claims carried by a signed access token.
///
/// The registered claims follow RFC 7519; `id` carries the owning user
/// identifier and `jti` the token's own identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer
    pub iss: String,

    /// Subject (token type marker)
    pub sub: String,

    /// Token identifier
    pub jti: String,

    /// Owning user identifier
    pub id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for an access token valid over `[issue_at, expire_at)`.
    pub fn new(
        token_id: impl Into<String>,
        user_id: impl Into<String>,
        issue_at: DateTime<Utc>,
        expire_at: DateTime<Utc>,
    ) -> Self {
        Self {
            iss: ISSUER.to_string(),
            sub: SUBJECT.to_string(),
            jti: token_id.into(),
            id: user_id.into(),
            iat: issue_at.timestamp(),
            nbf: issue_at.timestamp(),
            exp: expire_at.timestamp(),
        }
    }

    /// Owning user identifier.
    pub fn user_id(&self) -> &str {
        &self.id
    }

    /// Token identifier.
    pub fn token_id(&self) -> &str {
        &self.jti
    }
}
