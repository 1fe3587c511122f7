use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("user id must not be empty")]
    Empty,
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username must not be empty")]
    Empty,

    #[error("username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Store-layer outcome categories.
///
/// `NotFound` and `Conflict` are distinguished from transport failures so
/// callers can branch on absence and uniqueness violations without string
/// matching.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// A unique key collided on save.
    #[error("unique key conflict: {0}")]
    Conflict(String),

    /// Transport failure or operation timeout.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Serialization(String),

    /// Connection establishment gave up. Fatal at adapter construction only.
    #[error("store connection failed after {attempts} attempts: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },
}

/// Top-level error for authentication flows.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Bad username or password. Deliberately identical for "no such user"
    /// and "wrong password" so the response cannot be used to enumerate
    /// accounts.
    #[error("invalid authentication credentials")]
    InvalidCredentials,

    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("store error: {0}")]
    Store(StoreError),
}
