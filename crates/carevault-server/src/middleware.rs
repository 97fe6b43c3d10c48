//! Bearer-token auth gate.
//!
//! Runs ahead of every protected route. A request without an
//! `Authorization: Bearer …` header is rejected with 401; a request
//! whose token fails verification — bad signature, corrupt structure,
//! or past expiry, deliberately indistinguishable — is rejected with
//! 403. In both cases the handler never runs. On success the decoded
//! identity rides the request's extensions for exactly this request.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use carevault_auth::token;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub email: String,
}

pub async fn require_auth<C: Connection>(
    State(state): State<AppState<C>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => return Err(ApiError::MissingToken),
    };

    let claims = token::validate_access_token(token, state.auth_config())
        .map_err(|_| ApiError::InvalidToken)?
        .0;

    let account_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::InvalidToken)?;

    request.extensions_mut().insert(AuthContext {
        account_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
