use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::{error::ApiError, state::AppState};

/// Header carrying the encrypted caller email, set by the trusted gateway.
pub const IDENTITY_HEADER: &str = "X-User-Id";

/// Recovers the caller's email from the identity header. A missing header
/// and an undecryptable token are treated identically: unauthenticated.
pub fn caller_email(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(IDENTITY_HEADER)
        .ok_or_else(|| ApiError::Unauthorized("missing identity header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid identity header".to_string()))?;

    state
        .codec()
        .decrypt(token)
        .map_err(|_| ApiError::Unauthorized("invalid identity header".to_string()))
}

/// Access gate for the /admin route tree. This is the single enforcement
/// point for administrative privilege; handlers behind it carry no role
/// checks of their own.
pub async fn admin_gate(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let email = caller_email(&state, req.headers())?;

    let user = match state.users().get_user(&email).await {
        Ok(view) => view,
        // An identity that decrypts but resolves to no active account is
        // still unauthenticated, not a 404.
        Err(ApiError::NotFound(_)) => {
            return Err(ApiError::Unauthorized("unknown identity".to_string()))
        }
        Err(other) => return Err(other),
    };

    if user.role_id != state.config().values().admin_role_id {
        tracing::debug!(email = %email, role = %user.role_id, "admin access denied");
        return Err(ApiError::Forbidden("administrator role required".to_string()));
    }

    Ok(next.run(req).await)
}
