//! User, login and token endpoints

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    AppState,
    auth::{
        check_password_hash, get_bearer_token, hash_password, make_refresh_token,
        refresh_token_lifetime, session_token_lifetime,
    },
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::AuthUser,
    models::{EmailAndPassword, TokenResponse, UserResponse, UserWithTokenResponse},
    repositories::RepositoryError,
    response::respond_with_json,
};

const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";

/// Sign up a new user
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EmailAndPassword>,
) -> ApiResult<Response> {
    let hashed_password = hash_password(&payload.password)?;

    let user = state
        .repository
        .create_user(&payload.email, &hashed_password)
        .await?;

    info!("Created user {}", user.id);
    Ok(respond_with_json(
        StatusCode::CREATED,
        &UserResponse::from(user),
    ))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EmailAndPassword>,
) -> ApiResult<Response> {
    info!("Login attempt for user: {}", payload.email);

    let user = match state.repository.get_user_by_email(&payload.email).await {
        Ok(user) => user,
        Err(RepositoryError::NotFound) => {
            return Err(ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    match check_password_hash(&payload.password, &user.hashed_password) {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string())),
        Err(e) => {
            error!("Stored hash for user {} is unusable: {}", user.id, e);
            return Err(ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string()));
        }
    }

    let token = state
        .jwt_service
        .make_jwt(user.id, session_token_lifetime())?;

    let refresh_token = make_refresh_token()?;
    state
        .repository
        .create_refresh_token(&refresh_token, user.id, Utc::now() + refresh_token_lifetime())
        .await?;

    Ok(respond_with_json(
        StatusCode::OK,
        &UserWithTokenResponse {
            user: UserResponse::from(user),
            token,
            refresh_token,
        },
    ))
}

/// Exchange a refresh token for a new session token
pub async fn refresh_token(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let refresh_token = get_bearer_token(&headers)?;

    let user = state
        .repository
        .get_user_from_refresh_token(&refresh_token)
        .await
        .map_err(|e| {
            warn!("Refresh token rejected: {}", e);
            ApiError::Unauthorized(
                "The refresh token has been revoked, has expired or doesn't exist".to_string(),
            )
        })?;

    let token = state
        .jwt_service
        .make_jwt(user.id, session_token_lifetime())
        .map_err(|e| {
            error!("Failed to create session token: {}", e);
            ApiError::Unauthorized("Can't create a new token for the user".to_string())
        })?;

    Ok(respond_with_json(StatusCode::OK, &TokenResponse { token }))
}

/// Revoke a refresh token
pub async fn revoke_token(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let refresh_token = get_bearer_token(&headers)?;

    state
        .repository
        .revoke_token(&refresh_token)
        .await
        .map_err(|e| {
            warn!("Failed to revoke refresh token: {}", e);
            ApiError::Unauthorized("Refresh token was not found".to_string())
        })?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Change the caller's email and password
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(payload): JsonBody<EmailAndPassword>,
) -> ApiResult<Response> {
    let hashed_password = hash_password(&payload.password)?;

    let user = state
        .repository
        .update_user_email_and_password(auth_user.id, &payload.email, &hashed_password)
        .await
        .map_err(|e| {
            error!("Failed to update user {}: {}", auth_user.id, e);
            ApiError::Internal("Error updating the user's email and password".to_string())
        })?;

    Ok(respond_with_json(StatusCode::OK, &UserResponse::from(user)))
}
