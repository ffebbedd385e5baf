//! Custom error types for the Chirpy API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::{auth::AuthError, repositories::RepositoryError, response::respond_with_json};

/// Error returned by every handler, carrying the message shown to the client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        respond_with_json(
            self.status(),
            &ErrorBody {
                error: self.message(),
            },
        )
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PasswordHash(_) | AuthError::TokenCreation(_) | AuthError::RandomSource(_) => {
                error!("Credential error: {}", err);
                ApiError::Internal("Something went wrong".to_string())
            }
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound(err.to_string()),
            RepositoryError::UnknownToken
            | RepositoryError::RevokedToken
            | RepositoryError::ExpiredToken => ApiError::Unauthorized(err.to_string()),
            // duplicate emails are reported as a plain server error
            RepositoryError::DuplicateEmail | RepositoryError::Database(_) => {
                error!("Repository error: {}", err);
                ApiError::Internal("Something went wrong".to_string())
            }
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        for err in [
            AuthError::SignatureInvalid,
            AuthError::Expired,
            AuthError::InvalidIssuer,
            AuthError::InvalidSubject,
            AuthError::MalformedCredential("missing".to_string()),
        ] {
            assert_eq!(ApiError::from(err).status(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(
            ApiError::from(AuthError::PasswordHash("bad".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_errors_map_to_status() {
        assert_eq!(
            ApiError::from(RepositoryError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(RepositoryError::RevokedToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(RepositoryError::DuplicateEmail).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
