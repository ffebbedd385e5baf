//! Request extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::ApiError;

/// JSON request body decoded regardless of `Content-Type`.
///
/// An unreadable or undecodable body is rejected with a 500
/// `{"error":"Something went wrong"}`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            error!("Failed to read request body: {}", e);
            ApiError::Internal("Something went wrong".to_string())
        })?;

        decode_json(&bytes).map(JsonBody)
    }
}

/// Decode a JSON body already read from the request
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| {
        error!("Failed to decode request body: {}", e);
        ApiError::Internal("Something went wrong".to_string())
    })
}
