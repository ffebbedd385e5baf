//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

/// Body of signup, login and self-update requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailAndPassword {
    pub email: String,
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Login response: the user plus a session token and a refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithTokenResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: "a@x".to_string(),
            hashed_password: "$argon2id$secret".to_string(),
            is_chirpy_red: false,
        };

        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(json["id"], user.id.to_string());
        assert_eq!(json["email"], "a@x");
        assert_eq!(json["is_chirpy_red"], false);
        assert!(!json.to_string().contains("argon2id"));
    }

    #[test]
    fn test_user_with_token_is_flat() {
        let now = Utc::now();
        let response = UserWithTokenResponse {
            user: UserResponse {
                id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
                email: "a@x".to_string(),
                is_chirpy_red: true,
            },
            token: "jwt".to_string(),
            refresh_token: "ab".repeat(32),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["email"], "a@x");
        assert_eq!(json["token"], "jwt");
        assert_eq!(json["refresh_token"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let payload: EmailAndPassword = serde_json::from_str(r#"{"email":"a@x"}"#).unwrap();
        assert_eq!(payload.email, "a@x");
        assert_eq!(payload.password, "");
    }
}
