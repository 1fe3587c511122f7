use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::bearer_from_headers;
use crate::inbound::http::middleware::CredentialError;
use crate::inbound::http::router::AppState;

/// Revoke the presented access token and clear the session.
///
/// Presence-check only: the credential is not fully verified, since the
/// caller already proved possession by presenting it and revocation of a
/// stale token is still worth doing. No credential at all is not an error.
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<&'static str>), ApiError> {
    // Bearer header first.
    match bearer_from_headers(&headers) {
        Ok(token) => {
            state.service.sign_out(token).await?;
            return Ok((jar, ApiSuccess::new(StatusCode::OK, "signed out")));
        }
        Err(CredentialError::MissingBearer) => {}
        Err(e) => return Err(e.into()),
    }

    // Then the session cookie.
    if let Some(session) = state.sessions.decode(&jar) {
        state.service.sign_out(&session.access_token).await?;
        let jar = jar.add(state.sessions.clear());
        return Ok((jar, ApiSuccess::new(StatusCode::OK, "signed out")));
    }

    Ok((jar, ApiSuccess::new(StatusCode::OK, "already signed out")))
}
