//! Repositories for database operations
//!
//! Handlers only see the [`ChirpyRepository`] trait and [`RepositoryError`];
//! storage-specific errors stay inside the implementations.

use axum::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Chirp, RefreshToken, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Error kinds surfaced by a repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The requested row does not exist
    #[error("Record not found")]
    NotFound,

    /// A user with this email already exists
    #[error("Email is already registered")]
    DuplicateEmail,

    /// The refresh token was never issued
    #[error("Refresh token does not exist")]
    UnknownToken,

    /// The refresh token has been revoked
    #[error("Refresh token has been revoked")]
    RevokedToken,

    /// The refresh token is past its expiry
    #[error("Refresh token has expired")]
    ExpiredToken,

    /// Any other storage failure
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            other => RepositoryError::Database(DatabaseError::Query(other)),
        }
    }
}

/// Type alias for repository results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage operations the HTTP handlers depend on.
///
/// Every call is cancelled by dropping its future, which is what happens to
/// a handler when its client disconnects.
#[async_trait]
pub trait ChirpyRepository: Send + Sync {
    /// Create a user; fails with `DuplicateEmail` if the email is taken
    async fn create_user(&self, email: &str, hashed_password: &str) -> RepositoryResult<User>;

    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<User>;

    async fn update_user_email_and_password(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepositoryResult<User>;

    /// Set the Chirpy Red flag; fails with `NotFound` for an unknown user
    async fn upgrade_user_to_paid(&self, user_id: Uuid) -> RepositoryResult<()>;

    /// Delete every user together with their chirps and refresh tokens
    async fn reset_users(&self) -> RepositoryResult<()>;

    async fn create_chirp(&self, body: &str, author_id: Uuid) -> RepositoryResult<Chirp>;

    /// Every chirp, oldest first
    async fn get_chirps(&self) -> RepositoryResult<Vec<Chirp>>;

    async fn get_chirp_by_id(&self, id: Uuid) -> RepositoryResult<Chirp>;

    async fn delete_chirp_by_id(&self, id: Uuid) -> RepositoryResult<()>;

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<RefreshToken>;

    /// Resolve a refresh token to its owner.
    ///
    /// Fails with `UnknownToken`, `RevokedToken` or `ExpiredToken`.
    async fn get_user_from_refresh_token(&self, token: &str) -> RepositoryResult<User>;

    /// Mark a refresh token revoked; fails with `UnknownToken` if absent
    async fn revoke_token(&self, token: &str) -> RepositoryResult<()>;
}

/// Check a stored token's revocation and expiry, in that order
pub(crate) fn check_refresh_token(
    revoked_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> RepositoryResult<()> {
    if revoked_at.is_some() {
        return Err(RepositoryError::RevokedToken);
    }
    if now >= expires_at {
        return Err(RepositoryError::ExpiredToken);
    }
    Ok(())
}
