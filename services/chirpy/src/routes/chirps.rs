//! Chirp endpoints

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::AuthUser,
    models::{Chirp, CreateChirpRequest},
    moderation::clean_bad_words,
    repositories::RepositoryError,
    response::respond_with_json,
};

/// Longest chirp accepted, in UTF-8 bytes
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Query parameters for chirp listing
#[derive(Debug, Default, Deserialize)]
pub struct ChirpsQuery {
    /// Only return chirps by this author
    pub author_id: Option<String>,
    /// `desc` for newest first; anything else is oldest first
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Keep the chirps written by `author_id` (all when `None`) ordered by creation time
pub fn filter_and_sort(
    mut chirps: Vec<Chirp>,
    author_id: Option<Uuid>,
    order: SortOrder,
) -> Vec<Chirp> {
    if let Some(author_id) = author_id {
        chirps.retain(|c| c.user_id == author_id);
    }

    match order {
        SortOrder::Asc => chirps.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Desc => chirps.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    chirps
}

fn parse_chirp_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid chirp ID".to_string()))
}

/// Publish a chirp as the authenticated user
pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(payload): JsonBody<CreateChirpRequest>,
) -> ApiResult<Response> {
    if payload.body.is_empty() || auth_user.id.is_nil() {
        return Err(ApiError::BadRequest(
            "Chirp body and author are required".to_string(),
        ));
    }

    if payload.body.len() > MAX_CHIRP_LENGTH {
        return Err(ApiError::BadRequest("Chirp is too long".to_string()));
    }

    let body = clean_bad_words(&payload.body);

    let chirp = state
        .repository
        .create_chirp(&body, auth_user.id)
        .await
        .map_err(|e| {
            error!("Failed to create chirp: {}", e);
            ApiError::Internal("Something went wrong when creating the chirp".to_string())
        })?;

    info!("User {} created chirp {}", auth_user.id, chirp.id);
    Ok(respond_with_json(StatusCode::CREATED, &chirp))
}

/// List chirps, optionally filtered by author and sorted
pub async fn get_chirps(
    State(state): State<AppState>,
    Query(query): Query<ChirpsQuery>,
) -> ApiResult<Response> {
    let author_id = match query.author_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            Uuid::parse_str(raw)
                .map_err(|_| ApiError::BadRequest("Invalid author ID".to_string()))?,
        ),
    };
    let order = SortOrder::parse(query.sort.as_deref());

    let chirps = state.repository.get_chirps().await.map_err(|e| {
        error!("Failed to get chirps: {}", e);
        ApiError::Internal("Couldn't retrieve chirps".to_string())
    })?;

    Ok(respond_with_json(
        StatusCode::OK,
        &filter_and_sort(chirps, author_id, order),
    ))
}

/// Fetch a single chirp
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> ApiResult<Response> {
    let chirp_id = parse_chirp_id(&chirp_id)?;

    let chirp = state
        .repository
        .get_chirp_by_id(chirp_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("Chirp not found".to_string()),
            other => other.into(),
        })?;

    Ok(respond_with_json(StatusCode::OK, &chirp))
}

/// Delete one of the caller's own chirps
pub async fn delete_chirp(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(chirp_id): Path<String>,
) -> ApiResult<Response> {
    let chirp_id = parse_chirp_id(&chirp_id)?;

    let chirp = state
        .repository
        .get_chirp_by_id(chirp_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("Chirp not found".to_string()),
            other => other.into(),
        })?;

    if chirp.user_id != auth_user.id {
        return Err(ApiError::Forbidden(
            "Chirps can only be deleted by their creators".to_string(),
        ));
    }

    state
        .repository
        .delete_chirp_by_id(chirp_id)
        .await
        .map_err(|e| {
            error!("Failed to delete chirp {}: {}", chirp_id, e);
            ApiError::Internal("Error deleting the chirp".to_string())
        })?;

    info!("User {} deleted chirp {}", auth_user.id, chirp_id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
