//! Chirp model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Chirp entity, serialized as-is in responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Body of a chirp creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateChirpRequest {
    pub body: String,
}
