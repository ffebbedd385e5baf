//! Credential extraction from the `Authorization` header

use axum::http::{HeaderMap, header::AUTHORIZATION};

use super::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract the value of an `Authorization: Bearer <token>` header
pub fn get_bearer_token(headers: &HeaderMap) -> AuthResult<String> {
    authorization_value(headers, BEARER_PREFIX)
}

/// Extract the value of an `Authorization: ApiKey <key>` header
pub fn get_api_key(headers: &HeaderMap) -> AuthResult<String> {
    authorization_value(headers, API_KEY_PREFIX)
}

/// Compare a presented key with the configured one without short-circuiting
/// on the first differing byte
pub fn keys_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();
    if presented.len() != expected.len() {
        return false;
    }

    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn authorization_value(headers: &HeaderMap, prefix: &str) -> AuthResult<String> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AuthError::MalformedCredential("missing Authorization header".to_string())
        })?;

    let value = header.strip_prefix(prefix).ok_or_else(|| {
        AuthError::MalformedCredential(format!(
            "Authorization header must start with '{}'",
            prefix.trim_end()
        ))
    })?;

    Ok(value.trim().to_string())
}
