//! Errors raised by the credential primitives

use thiserror::Error;

/// Credential failure kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Header missing, wrong scheme, or token that cannot be decoded
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// Signature does not match the deployment secret
    #[error("Token signature is invalid")]
    SignatureInvalid,

    /// Token lifetime has elapsed
    #[error("Token has expired")]
    Expired,

    /// Token was issued by someone other than this service
    #[error("Token issuer is invalid")]
    InvalidIssuer,

    /// Token subject is not a user id
    #[error("Token subject is not a valid user id")]
    InvalidSubject,

    /// Stored password hash could not be parsed or computed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Session token could not be signed
    #[error("Failed to create token: {0}")]
    TokenCreation(String),

    /// The OS random source failed
    #[error("Random source error: {0}")]
    RandomSource(String),
}

/// Type alias for credential results
pub type AuthResult<T> = Result<T, AuthError>;
