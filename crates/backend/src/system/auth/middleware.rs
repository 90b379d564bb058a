use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::AuthError;
use crate::shared::app_state::SharedState;

/// Middleware that requires valid JWT authentication
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::Unauthenticated)?;

    let claims = state.auth.validate_token(token).map_err(|e| {
        tracing::debug!("Rejected token: {:#}", e);
        AuthError::Unauthenticated
    })?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
