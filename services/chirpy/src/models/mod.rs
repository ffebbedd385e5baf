//! Chirpy models

pub mod chirp;
pub mod refresh_token;
pub mod user;

// Re-export for convenience
pub use chirp::{Chirp, CreateChirpRequest};
pub use refresh_token::{RefreshToken, TokenResponse};
pub use user::{EmailAndPassword, User, UserResponse, UserWithTokenResponse};
