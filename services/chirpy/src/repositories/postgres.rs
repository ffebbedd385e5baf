//! PostgreSQL repository backed by sqlx

use axum::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseError;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::{ChirpyRepository, RepositoryError, RepositoryResult, check_refresh_token};
use crate::models::{Chirp, RefreshToken, User};

/// PostgreSQL repository
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    /// Create a new repository on top of an initialised pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChirpyRepository for PgRepository {
    async fn create_user(&self, email: &str, hashed_password: &str) -> RepositoryResult<User> {
        info!("Creating new user: {}", email);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, created_at, updated_at, email, hashed_password)
            VALUES ($1, NOW(), NOW(), $2, $3)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let err = DatabaseError::Query(e);
            if err.is_unique_violation() {
                RepositoryError::DuplicateEmail
            } else {
                RepositoryError::Database(err)
            }
        })
    }

    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user_email_and_password(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepositoryResult<User> {
        info!("Updating credentials for user: {}", user_id);

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            other => {
                let err = DatabaseError::Query(other);
                if err.is_unique_violation() {
                    RepositoryError::DuplicateEmail
                } else {
                    RepositoryError::Database(err)
                }
            }
        })
    }

    async fn upgrade_user_to_paid(&self, user_id: Uuid) -> RepositoryResult<()> {
        info!("Upgrading user {} to Chirpy Red", user_id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn reset_users(&self) -> RepositoryResult<()> {
        info!("Deleting all users");

        sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        Ok(())
    }

    async fn create_chirp(&self, body: &str, author_id: Uuid) -> RepositoryResult<Chirp> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (id, created_at, updated_at, body, user_id)
            VALUES ($1, NOW(), NOW(), $2, $3)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(body)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chirp)
    }

    async fn get_chirps(&self) -> RepositoryResult<Vec<Chirp>> {
        let chirps = sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(chirps)
    }

    async fn get_chirp_by_id(&self, id: Uuid) -> RepositoryResult<Chirp> {
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chirp)
    }

    async fn delete_chirp_by_id(&self, id: Uuid) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<RefreshToken> {
        let refresh_token = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at, revoked_at)
            VALUES ($1, NOW(), NOW(), $2, $3, NULL)
            RETURNING token, created_at, updated_at, user_id, expires_at, revoked_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(refresh_token)
    }

    async fn get_user_from_refresh_token(&self, token: &str) -> RepositoryResult<User> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.created_at, u.updated_at, u.email, u.hashed_password, u.is_chirpy_red,
                   rt.expires_at, rt.revoked_at
            FROM refresh_tokens rt
            JOIN users u ON u.id = rt.user_id
            WHERE rt.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::UnknownToken)?;

        check_refresh_token(
            row.try_get("revoked_at")?,
            row.try_get("expires_at")?,
            Utc::now(),
        )?;

        Ok(User {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            email: row.try_get("email")?,
            hashed_password: row.try_get("hashed_password")?,
            is_chirpy_red: row.try_get("is_chirpy_red")?,
        })
    }

    async fn revoke_token(&self, token: &str) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::UnknownToken);
        }

        Ok(())
    }
}
