use chrono::DateTime;
use chrono::Utc;

/// Short-lived signed credential proving identity for a bounded window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub id: String,

    /// Signed JWT value.
    pub value: String,

    pub user_id: String,
    pub expire_at: DateTime<Utc>,
}

/// Longer-lived opaque credential used to obtain a new access token.
///
/// The value is the identifier itself: it must be looked up in the store,
/// never decoded. Opacity is the security property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: String,
    pub value: String,
    pub user_id: String,
    pub expire_at: DateTime<Utc>,
}

/// Access/refresh pair minted by a single sign-in.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}
