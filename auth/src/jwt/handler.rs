use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::claims::ISSUER;
use super::claims::SUBJECT;
use super::errors::JwtError;

/// Signs and verifies access tokens.
///
/// Uses HS256 (HMAC with SHA-256): a single shared secret is known to both
/// the issuing and the verifying side.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new handler from the shared signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact token string.
    ///
    /// # Errors
    /// * `Signing` - the token could not be signed; no partial token is
    ///   ever returned
    pub fn encode(&self, claims: &AccessClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Verify a token's signature and registered claims.
    ///
    /// The issuer and subject must match the fixed expected values and the
    /// current time must fall within `[nbf, exp)`.
    ///
    /// # Errors
    /// * `Expired` - well-formed and correctly signed, but past expiry
    /// * `Invalid` - malformed, bad signature, or wrong issuer/subject
    pub fn decode(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);
        validation.sub = Some(SUBJECT.to_string());
        validation.validate_nbf = true;
        validation.leeway = 0;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Decode claims without verifying the signature or expiry.
    ///
    /// # Security Warning
    /// This does NOT establish trust. Only use it to recover a token
    /// identifier for lookup/deletion (sign-out); never for authorization
    /// decisions.
    pub fn decode_unverified(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::Invalid(e.to_string()))?;

        Ok(token_data.claims)
    }
}
