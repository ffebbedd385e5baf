//! Payment provider webhook

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    AppState,
    auth::{get_api_key, keys_match},
    error::{ApiError, ApiResult},
    extract::decode_json,
    repositories::RepositoryError,
};

/// Event name that promotes a user to Chirpy Red
pub const USER_UPGRADED: &str = "user.upgraded";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookEvent {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookData {
    pub user_id: String,
}

/// Handle a Polka event
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let api_key = get_api_key(&headers)?;
    if !keys_match(&api_key, &state.polka_key) {
        warn!("Webhook called with a wrong api key");
        return Err(ApiError::Unauthorized("Invalid api key".to_string()));
    }

    let payload: WebhookEvent = decode_json(&body)?;

    if payload.event != USER_UPGRADED {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let user_id = Uuid::parse_str(&payload.data.user_id).map_err(|e| {
        error!("Webhook carried an invalid user id {:?}: {}", payload.data.user_id, e);
        ApiError::Internal("Error parsing the user id".to_string())
    })?;

    state
        .repository
        .upgrade_user_to_paid(user_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

    info!("User {} upgraded to Chirpy Red", user_id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
