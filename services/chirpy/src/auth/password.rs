//! Argon2id password hashing

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;

use super::error::{AuthError, AuthResult};

/// Hash a password with Argon2id and the library default parameters.
///
/// The returned PHC string carries the algorithm, parameters and salt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Check a candidate password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch and an error only when the stored hash
/// itself is unusable.
pub fn check_password_hash(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_check() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(check_password_hash("correct horse", &hash).unwrap());
        assert!(!check_password_hash("battery staple", &hash).unwrap());
        assert!(!check_password_hash("", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();
        assert_ne!(first, second);
        assert!(check_password_hash("p", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let err = check_password_hash("p", "not-a-hash").unwrap_err();
        assert!(matches!(err, AuthError::PasswordHash(_)));
    }
}
