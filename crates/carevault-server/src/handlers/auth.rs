//! Signup and signin handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use carevault_auth::service::{SignInInput, SignUpInput};
use carevault_core::models::account::PublicAccount;
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

/// Signup request body.
///
/// Fields default to empty strings so that a missing key surfaces as a
/// service-level validation error rather than a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup/signin response: bearer token plus the digest-stripped
/// account.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub account: PublicAccount,
}

pub async fn sign_up<C: Connection>(
    State(state): State<AppState<C>>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let out = state
        .service
        .sign_up(SignUpInput {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: out.token,
            account: out.account,
        }),
    ))
}

pub async fn sign_in<C: Connection>(
    State(state): State<AppState<C>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let out = state
        .service
        .sign_in(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: out.token,
        account: out.account,
    }))
}
