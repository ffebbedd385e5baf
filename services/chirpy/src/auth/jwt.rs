//! JWT service for session token generation and validation
//!
//! Session tokens are HS256-signed JWTs carrying the user id as subject.
//! Validation checks the signature, then expiry, then issuer, then subject.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};

/// Issuer written into and required from every session token
pub const TOKEN_ISSUER: &str = "chirpy";

/// How long a session token minted at login or refresh stays valid
pub fn session_token_lifetime() -> Duration {
    Duration::hours(1)
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// User ID
    pub sub: String,
    /// Issued at time (seconds since epoch)
    pub iat: i64,
    /// Expiration time (seconds since epoch)
    pub exp: i64,
}

/// JWT service bound to the deployment secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Initialize a new JWT service from the HMAC secret
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp and iss are checked by hand in `validate_jwt`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        JwtService {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a session token for `user_id` valid for `expires_in`
    pub fn make_jwt(&self, user_id: Uuid, expires_in: Duration) -> AuthResult<String> {
        let now = Utc::now();

        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a session token and return the user id it was minted for
    pub fn validate_jwt(&self, token: &str) -> AuthResult<Uuid> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                    _ => AuthError::MalformedCredential(e.to_string()),
                }
            })?;
        let claims = token_data.claims;

        if Utc::now().timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }

        if claims.iss != TOKEN_ISSUER {
            return Err(AuthError::InvalidIssuer);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(claims: &Claims, secret: &[u8]) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn test_token_gen_and_verify() {
        let svc = JwtService::new(b"super-secret");
        let user_id = Uuid::new_v4();

        let token = svc.make_jwt(user_id, Duration::hours(1)).unwrap();
        assert_eq!(svc.validate_jwt(&token).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let svc = JwtService::new(b"super-secret");
        let other = JwtService::new(b"another-secret");

        let token = svc.make_jwt(Uuid::new_v4(), Duration::hours(1)).unwrap();
        assert_eq!(other.validate_jwt(&token), Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let svc = JwtService::new(b"super-secret");

        let token = svc.make_jwt(Uuid::new_v4(), Duration::seconds(-5)).unwrap();
        assert_eq!(svc.validate_jwt(&token), Err(AuthError::Expired));
    }

    #[tokio::test]
    async fn test_token_expires_after_its_lifetime() {
        let svc = JwtService::new(b"super-secret");
        let user_id = Uuid::new_v4();

        let token = svc.make_jwt(user_id, Duration::seconds(1)).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
        assert_eq!(svc.validate_jwt(&token), Err(AuthError::Expired));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: "not-chirpy".to_string(),
            sub: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = sign(&claims, b"super-secret");

        let svc = JwtService::new(b"super-secret");
        assert_eq!(svc.validate_jwt(&token), Err(AuthError::InvalidIssuer));
    }

    #[test]
    fn test_subject_must_be_uuid() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: "user-42".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = sign(&claims, b"super-secret");

        let svc = JwtService::new(b"super-secret");
        assert_eq!(svc.validate_jwt(&token), Err(AuthError::InvalidSubject));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let svc = JwtService::new(b"super-secret");
        assert!(matches!(
            svc.validate_jwt("definitely.not.ajwt"),
            Err(AuthError::MalformedCredential(_))
        ));
    }
}
