use axum::extract::{Json, State};
use contracts::system::auth::{
    LoginRequest, LoginResponse, MessageResponse, SignupRequest, UserInfo,
};

use crate::shared::app_state::SharedState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::AuthError;
use crate::system::users::service as user_service;

/// Signup handler
pub async fn signup(Json(request): Json<SignupRequest>) -> Result<Json<MessageResponse>, AuthError> {
    user_service::signup(request).await?;

    Ok(Json(MessageResponse {
        message: "Signup successful! You can now log in.".to_string(),
    }))
}

/// Login handler
pub async fn login(
    State(state): State<SharedState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let access_token = state
        .auth
        .generate_access_token(&user.id, &user.username)?;

    tracing::info!("User '{}' logged in", user.username);

    Ok(Json(LoginResponse {
        access_token,
        user: user.into(),
    }))
}

/// Get current user handler (protected by middleware)
pub async fn current_user(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<UserInfo>, AuthError> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    Ok(Json(user.into()))
}
