use thiserror::Error;

/// Error type for token signing and verification.
///
/// `Expired` is kept distinct from `Invalid` so callers can tell "log in
/// again" apart from "tampered".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token is expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(String),
}
