//! Authentication utilities library
//!
//! Reusable credential-handling infrastructure:
//! - Password hashing (PBKDF2-HMAC-SHA256 with per-user salts)
//! - JWT access-token signing and validation
//! - Access/refresh token minting
//!
//! Storage and transport stay out of this crate; a service wires these
//! pieces into its own sign-in and verification flows.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password", "per-user-salt");
//! assert!(hasher.verify(&digest, "my_password", "per-user-salt"));
//! ```
//!
//! ## Issuing and Validating Tokens
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", 600, 3600);
//! let pair = issuer.issue_pair("user123").unwrap();
//!
//! let claims = issuer.jwt().decode(&pair.access.value).unwrap();
//! assert_eq!(claims.user_id(), "user123");
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::generate_salt;
pub use password::PasswordHasher;
pub use tokens::AccessToken;
pub use tokens::RefreshToken;
pub use tokens::TokenPair;
