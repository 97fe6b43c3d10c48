//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use carevault_core::error::VaultError;
use serde_json::json;

/// Error type returned by every handler and the auth gate.
#[derive(Debug)]
pub enum ApiError {
    /// No bearer token on a protected route — distinct from an invalid
    /// one, per the gate's state machine.
    MissingToken,
    /// Present but unverifiable token. Signature mismatch, structural
    /// corruption, and expiry all collapse into this one response.
    InvalidToken,
    Service(VaultError),
}

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        Self::Service(err)
    }
}

impl ApiError {
    fn status_code_message(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "authentication required".into(),
            ),
            Self::InvalidToken => (
                StatusCode::FORBIDDEN,
                "INVALID_TOKEN",
                "invalid or expired token".into(),
            ),
            Self::Service(err) => match err {
                VaultError::Validation { message } => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
                }
                VaultError::AlreadyExists { .. } => (
                    StatusCode::CONFLICT,
                    "EMAIL_TAKEN",
                    "an account with this email already exists".into(),
                ),
                VaultError::AuthenticationFailed { reason } => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    reason.clone(),
                ),
                VaultError::AuthorizationDenied { .. } => (
                    StatusCode::FORBIDDEN,
                    "INVALID_TOKEN",
                    "invalid or expired token".into(),
                ),
                VaultError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", "account not found".into())
                }
                VaultError::Database(_) | VaultError::Crypto(_) | VaultError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal server error".into(),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_code_message();

        // Internals are logged in full but never leave the process.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            if let Self::Service(err) = &self {
                tracing::error!(error = %err, "request failed");
            }
        }

        (status, Json(json!({ "code": code, "message": message }))).into_response()
    }
}
