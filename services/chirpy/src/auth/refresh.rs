//! Opaque refresh tokens

use chrono::Duration;
use rand::{RngCore, rngs::OsRng};

use super::error::{AuthError, AuthResult};

/// Number of random bytes behind a refresh token
const REFRESH_TOKEN_BYTES: usize = 32;

/// How long a refresh token stays usable after it is issued
pub fn refresh_token_lifetime() -> Duration {
    Duration::days(60)
}

/// Generate a refresh token: 32 bytes from the OS CSPRNG as lowercase hex
pub fn make_refresh_token() -> AuthResult<String> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::RandomSource(e.to_string()))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_format() {
        let token = make_refresh_token().unwrap();
        assert_eq!(token.len(), 64);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_refresh_tokens_are_distinct() {
        assert_ne!(make_refresh_token().unwrap(), make_refresh_token().unwrap());
    }

    #[test]
    fn test_refresh_token_lifetime() {
        assert_eq!(refresh_token_lifetime().num_hours(), 60 * 24);
    }
}
