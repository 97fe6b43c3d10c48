//! Authentication error types.

use carevault_core::error::VaultError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email and wrong password produce this same variant with
    /// this same message — callers must not be able to tell which.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for VaultError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => VaultError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                VaultError::AuthorizationDenied {
                    reason: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => VaultError::Crypto(msg),
        }
    }
}
