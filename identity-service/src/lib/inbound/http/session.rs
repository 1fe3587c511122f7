use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use base64ct::Base64UrlUnpadded;
use base64ct::Encoding;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::aead::KeyInit;
use chacha20poly1305::aead::OsRng;
use chacha20poly1305::AeadCore;
use chacha20poly1305::ChaCha20Poly1305;
use chacha20poly1305::Key;
use chacha20poly1305::Nonce;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

/// Fixed session cookie name.
pub const COOKIE_NAME: &str = "session";

const COOKIE_PATH: &str = "/";
const COOKIE_MAX_AGE_DAYS: i64 = 14;

/// Serialization format version. Bumped on any payload change; cookies from
/// other versions decode as absent rather than corrupting.
const SESSION_VERSION: u8 = 1;

const NONCE_LEN: usize = 12;

/// Authenticated session carried client-side in an encrypted cookie.
///
/// Bundles the issued token pair with the owning identity. Never persisted
/// server-side; its lifecycle is the cookie's own expiry plus explicit
/// clearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expire_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct SessionEnvelope {
    v: u8,
    #[serde(flatten)]
    session: Session,
}

/// Error type for session encoding.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("failed to serialize session: {0}")]
    Serialize(String),

    #[error("failed to encrypt session: {0}")]
    Encrypt(String),
}

/// Encrypts sessions into cookies and back.
///
/// The payload is serialized, then sealed with an AEAD cipher under a
/// server-held key: confidentiality and integrity, not merely base64. Any
/// cookie that fails the integrity check decodes as absent, so a bad or
/// stale cookie degrades to "not authenticated" instead of an error.
#[derive(Clone)]
pub struct SessionCodec {
    key: Key,
    secure: bool,
}

impl SessionCodec {
    /// Create a codec from the configured session key.
    ///
    /// `secure` controls the cookie's Secure attribute. Turning it off is a
    /// deliberate weakening for plaintext local testing only.
    pub fn new(key: &str, secure: bool) -> Self {
        // Stretch the configured key to exactly 32 bytes.
        let digest = Sha256::digest(key.as_bytes());
        Self {
            key: Key::clone_from_slice(&digest),
            secure,
        }
    }

    /// Seal a session into its cookie.
    ///
    /// # Errors
    /// * `Serialize`/`Encrypt` - the payload could not be sealed
    pub fn encode(&self, session: &Session) -> Result<Cookie<'static>, SessionError> {
        let envelope = SessionEnvelope {
            v: SESSION_VERSION,
            session: session.clone(),
        };
        let plaintext =
            serde_json::to_vec(&envelope).map_err(|e| SessionError::Serialize(e.to_string()))?;
        let value = self.seal(&plaintext)?;

        Ok(Cookie::build((COOKIE_NAME, value))
            .path(COOKIE_PATH)
            .max_age(time::Duration::days(COOKIE_MAX_AGE_DAYS))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build())
    }

    /// Recover the session from a request's cookies.
    ///
    /// Returns `None` for an absent cookie, a failed integrity check, or an
    /// unknown format version. None of these are errors: the caller simply
    /// has no session.
    pub fn decode(&self, jar: &CookieJar) -> Option<Session> {
        let cookie = jar.get(COOKIE_NAME)?;
        let plaintext = self.open(cookie.value())?;
        let envelope: SessionEnvelope = serde_json::from_slice(&plaintext).ok()?;

        if envelope.v != SESSION_VERSION {
            tracing::debug!(version = envelope.v, "Rejecting session with unknown version");
            return None;
        }

        Some(envelope.session)
    }

    /// Removal cookie clearing the session.
    ///
    /// Clearing an already-absent session is a silent success.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((COOKIE_NAME, ""))
            .path(COOKIE_PATH)
            .http_only(true)
            .secure(self.secure)
            .build();
        cookie.make_removal();
        cookie
    }

    fn seal(&self, plaintext: &[u8]) -> Result<String, SessionError> {
        let cipher = ChaCha20Poly1305::new(&self.key);
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| SessionError::Encrypt(e.to_string()))?;

        // nonce(12) || ciphertext
        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(Base64UrlUnpadded::encode_string(&sealed))
    }

    fn open(&self, sealed: &str) -> Option<Vec<u8>> {
        let data = Base64UrlUnpadded::decode_vec(sealed).ok()?;
        if data.len() < NONCE_LEN {
            return None;
        }

        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        let cipher = ChaCha20Poly1305::new(&self.key);
        cipher.decrypt(Nonce::from_slice(nonce), ciphertext).ok()
    }
}
