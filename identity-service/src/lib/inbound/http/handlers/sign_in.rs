use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use auth::AccessToken;
use auth::RefreshToken;
use auth::TokenPair;

use super::ApiError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::Session;

/// Authenticate a username/password pair.
///
/// On success the token pair goes out twice: as the JSON body for API
/// clients and inside the encrypted session cookie for browsers.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignInRequestBody>, JsonRejection>,
) -> Result<(CookieJar, Json<TokenPairData>), ApiError> {
    // Unparseable payloads and missing fields are a 422, details withheld.
    let Json(body) =
        body.map_err(|_| ApiError::UnprocessableEntity("invalid request payload".to_string()))?;
    if body.username.is_empty() || body.password.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "invalid request payload".to_string(),
        ));
    }

    let (user, pair) = state.service.sign_in(&body.username, &body.password).await?;

    let session = Session {
        user_id: user.id.to_string(),
        access_token: pair.access.value.clone(),
        refresh_token: pair.refresh.value.clone(),
        expire_at: pair.access.expire_at,
    };
    let cookie = state.sessions.encode(&session).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode session cookie");
        ApiError::InternalServerError("internal server error".to_string())
    })?;

    Ok((jar.add(cookie), Json(TokenPairData::from(&pair))))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequestBody {
    username: String,
    password: String,
}

/// Wire shape of one issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub value: String,
    pub user_id: String,
    pub expire_at: DateTime<Utc>,
}

impl From<&AccessToken> for TokenData {
    fn from(token: &AccessToken) -> Self {
        Self {
            value: token.value.clone(),
            user_id: token.user_id.clone(),
            expire_at: token.expire_at,
        }
    }
}

impl From<&RefreshToken> for TokenData {
    fn from(token: &RefreshToken) -> Self {
        Self {
            value: token.value.clone(),
            user_id: token.user_id.clone(),
            expire_at: token.expire_at,
        }
    }
}

/// Wire shape of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: TokenData,
    pub refresh_token: TokenData,
}

impl From<&TokenPair> for TokenPairData {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: TokenData::from(&pair.access),
            refresh_token: TokenData::from(&pair.refresh),
        }
    }
}
