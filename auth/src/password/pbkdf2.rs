use pbkdf2::pbkdf2_hmac;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Derived digest length in bytes.
const DIGEST_LEN: usize = 64;

/// PBKDF2 iteration count. Fixed: changing it invalidates every stored digest.
const ROUNDS: u32 = 1 << 8;

/// Password hashing implementation.
///
/// Derives a hex-encoded PBKDF2-HMAC-SHA256 digest from a clear-text secret
/// and a per-user salt. The derivation is deterministic for a given
/// `(secret, salt)` pair so a stored digest can be recomputed for
/// verification.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a clear-text secret with the given salt.
    ///
    /// Empty secrets and salts are valid inputs and produce a digest;
    /// rejecting empty credentials is the sign-in flow's responsibility.
    ///
    /// # Returns
    /// Hex-encoded digest string
    pub fn hash(&self, secret: &str, salt: &str) -> String {
        let mut derived = [0u8; DIGEST_LEN];
        pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt.as_bytes(), ROUNDS, &mut derived);
        hex::encode(derived)
    }

    /// Verify a secret against a stored digest.
    ///
    /// The comparison runs in constant time with respect to the digest
    /// contents.
    ///
    /// # Returns
    /// True if the secret and salt reproduce the digest
    pub fn verify(&self, digest: &str, secret: &str, salt: &str) -> bool {
        let computed = self.hash(secret, salt);
        computed.as_bytes().ct_eq(digest.as_bytes()).into()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a random alphanumeric salt of `len` characters.
pub fn generate_salt(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
