//! In-process repository used by tests and local experiments

use std::collections::HashMap;
use std::sync::Arc;

use axum::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ChirpyRepository, RepositoryError, RepositoryResult, check_refresh_token};
use crate::models::{Chirp, RefreshToken, User};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    chirps: HashMap<Uuid, Chirp>,
    refresh_tokens: HashMap<String, RefreshToken>,
}

/// Repository keeping every table in memory behind one lock
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChirpyRepository for MemoryRepository {
    async fn create_user(&self, email: &str, hashed_password: &str) -> RepositoryResult<User> {
        let mut tables = self.tables.lock().await;

        if tables.users.values().any(|u| u.email == email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<User> {
        let tables = self.tables.lock().await;

        tables
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_user_email_and_password(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepositoryResult<User> {
        let mut tables = self.tables.lock().await;

        if tables
            .users
            .values()
            .any(|u| u.email == email && u.id != user_id)
        {
            return Err(RepositoryError::DuplicateEmail);
        }

        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or(RepositoryError::NotFound)?;
        user.email = email.to_string();
        user.hashed_password = hashed_password.to_string();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn upgrade_user_to_paid(&self, user_id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().await;

        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or(RepositoryError::NotFound)?;
        user.is_chirpy_red = true;
        user.updated_at = Utc::now();

        Ok(())
    }

    async fn reset_users(&self) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().await;

        tables.users.clear();
        tables.chirps.clear();
        tables.refresh_tokens.clear();

        Ok(())
    }

    async fn create_chirp(&self, body: &str, author_id: Uuid) -> RepositoryResult<Chirp> {
        let mut tables = self.tables.lock().await;

        // foreign key on chirps.user_id
        if !tables.users.contains_key(&author_id) {
            return Err(RepositoryError::NotFound);
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id: author_id,
        };
        tables.chirps.insert(chirp.id, chirp.clone());

        Ok(chirp)
    }

    async fn get_chirps(&self) -> RepositoryResult<Vec<Chirp>> {
        let tables = self.tables.lock().await;

        let mut chirps: Vec<Chirp> = tables.chirps.values().cloned().collect();
        chirps.sort_by_key(|c| c.created_at);

        Ok(chirps)
    }

    async fn get_chirp_by_id(&self, id: Uuid) -> RepositoryResult<Chirp> {
        let tables = self.tables.lock().await;

        tables
            .chirps
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_chirp_by_id(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().await;
        tables.chirps.remove(&id);

        Ok(())
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepositoryResult<RefreshToken> {
        let mut tables = self.tables.lock().await;

        if !tables.users.contains_key(&user_id) {
            return Err(RepositoryError::NotFound);
        }

        let now = Utc::now();
        let refresh_token = RefreshToken {
            token: token.to_string(),
            created_at: now,
            updated_at: now,
            user_id,
            expires_at,
            revoked_at: None,
        };
        tables
            .refresh_tokens
            .insert(refresh_token.token.clone(), refresh_token.clone());

        Ok(refresh_token)
    }

    async fn get_user_from_refresh_token(&self, token: &str) -> RepositoryResult<User> {
        let tables = self.tables.lock().await;

        let refresh_token = tables
            .refresh_tokens
            .get(token)
            .ok_or(RepositoryError::UnknownToken)?;
        check_refresh_token(refresh_token.revoked_at, refresh_token.expires_at, Utc::now())?;

        tables
            .users
            .get(&refresh_token.user_id)
            .cloned()
            .ok_or(RepositoryError::UnknownToken)
    }

    async fn revoke_token(&self, token: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().await;

        let refresh_token = tables
            .refresh_tokens
            .get_mut(token)
            .ok_or(RepositoryError::UnknownToken)?;
        let now = Utc::now();
        refresh_token.revoked_at = Some(now);
        refresh_token.updated_at = now;

        Ok(())
    }
}
