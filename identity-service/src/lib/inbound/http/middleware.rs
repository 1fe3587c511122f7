use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

use auth::AccessClaims;

use crate::identity::errors::StoreError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Verified identity published into request extensions for downstream
/// handlers.
///
/// A dedicated type rather than a string key: chained middleware can check
/// for it without collision, and handlers extract it type-safely.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub access_token_id: String,
}

/// Transport-credential extraction failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("missing bearer")]
    MissingBearer,

    #[error("bearer has invalid content")]
    InvalidBearer,

    #[error("missing session cookie")]
    MissingSession,
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Extract the bearer token from the Authorization header.
pub fn bearer_from_headers(headers: &HeaderMap) -> Result<&str, CredentialError> {
    let header = match headers.get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| CredentialError::InvalidBearer)?,
        None => return Err(CredentialError::MissingBearer),
    };
    if header.is_empty() {
        return Err(CredentialError::MissingBearer);
    }

    let mut chunks = header.split(' ');
    match (chunks.next(), chunks.next(), chunks.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(CredentialError::InvalidBearer),
    }
}

/// Middleware establishing identity from the Authorization bearer header.
pub async fn bearer_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Idempotent across chained layers.
    if req.extensions().get::<Identity>().is_some() {
        return Ok(next.run(req).await);
    }

    let token =
        bearer_from_headers(req.headers()).map_err(|e| ApiError::from(e).into_response())?;

    let claims = state.jwt.decode(token).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::from(e).into_response()
    })?;

    attach_identity(state, req, next, claims).await
}

/// Middleware establishing identity from the session cookie.
pub async fn session_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    if req.extensions().get::<Identity>().is_some() {
        return Ok(next.run(req).await);
    }

    let jar = CookieJar::from_headers(req.headers());
    let session = state
        .sessions
        .decode(&jar)
        .ok_or_else(|| ApiError::from(CredentialError::MissingSession).into_response())?;

    // The enclosed access token is trusted only after full verification,
    // exactly as if it had arrived as a bearer.
    let claims = state.jwt.decode(&session.access_token).map_err(|e| {
        tracing::warn!(error = %e, "Session access token rejected");
        ApiError::from(e).into_response()
    })?;

    attach_identity(state, req, next, claims).await
}

/// Shared downstream path: cross-check the store, then publish the identity.
async fn attach_identity(
    state: AppState,
    mut req: Request,
    next: Next,
    claims: AccessClaims,
) -> Result<Response, Response> {
    // A deleted user loses access immediately, whatever lifetime the token
    // has left.
    match state.service.authorized_user(claims.user_id()).await {
        Ok(_) => {}
        Err(StoreError::NotFound) => {
            tracing::warn!(user_id = %claims.user_id(), "Verified token for unknown user");
            return Err(ApiError::Unauthorized(
                "invalid authentication credentials".to_string(),
            )
            .into_response());
        }
        Err(e) => {
            tracing::error!(error = %e, "Identity cross-check failed");
            return Err(
                ApiError::InternalServerError("internal server error".to_string()).into_response(),
            );
        }
    }

    req.extensions_mut().insert(Identity {
        user_id: claims.user_id().to_string(),
        access_token_id: claims.token_id().to_string(),
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_missing_header() {
        assert_eq!(
            bearer_from_headers(&HeaderMap::new()),
            Err(CredentialError::MissingBearer)
        );
    }

    #[test]
    fn test_bearer_empty_header() {
        assert_eq!(
            bearer_from_headers(&headers_with_authorization("")),
            Err(CredentialError::MissingBearer)
        );
    }

    #[test]
    fn test_bearer_well_formed() {
        assert_eq!(
            bearer_from_headers(&headers_with_authorization("Bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_bearer_malformed_variants() {
        for value in ["Basic abc", "Bearer", "Bearer ", "Bearer a b", "bearer abc"] {
            assert_eq!(
                bearer_from_headers(&headers_with_authorization(value)),
                Err(CredentialError::InvalidBearer),
                "expected invalid bearer for {value:?}"
            );
        }
    }
}
