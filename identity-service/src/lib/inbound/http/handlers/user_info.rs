use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::models::UserInfo;
use crate::inbound::http::middleware::Identity;
use crate::inbound::http::router::AppState;

/// Return the authenticated caller's public profile.
pub async fn user_info(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<UserInfo>, ApiError> {
    let info = state.service.user_info(&identity.user_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, info))
}
