//! Authentication and request-counting middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{auth::get_bearer_token, error::ApiError, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Authentication middleware
///
/// Validates the Bearer session token and stores the caller as an
/// [`AuthUser`] request extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = get_bearer_token(req.headers()).map_err(|e| {
        warn!("Rejected request without usable bearer token: {}", e);
        ApiError::Unauthorized("Access token is malformed or missing".to_string())
    })?;

    let user_id = state.jwt_service.validate_jwt(&token).map_err(|e| {
        warn!("Failed to validate token: {}", e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthUser { id: user_id });

    Ok(next.run(req).await)
}

/// Count every request that reaches the static file server
pub async fn metrics_inc(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.file_server_hits.increment();
    next.run(req).await
}
