//! Credential primitives: password hashing, session tokens, refresh tokens
//! and `Authorization` header parsing

pub mod error;
pub mod headers;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export for convenience
pub use error::{AuthError, AuthResult};
pub use headers::{get_api_key, get_bearer_token, keys_match};
pub use jwt::{JwtService, session_token_lifetime};
pub use password::{check_password_hash, hash_password};
pub use refresh::{make_refresh_token, refresh_token_lifetime};
