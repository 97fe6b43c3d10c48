//! Profile handlers (protected routes).

use axum::extract::State;
use axum::{Extension, Json};
use carevault_core::models::account::PublicAccount;
use surrealdb::Connection;

use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

pub async fn get_profile<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<PublicAccount>, ApiError> {
    let account = state.service.get_account(ctx.account_id).await?;
    Ok(Json(account))
}

/// Apply a partial profile update.
///
/// The patch is an arbitrary JSON object; `password` and `email` keys
/// are dropped by the account service, never honored here.
pub async fn update_profile<C: Connection>(
    State(state): State<AppState<C>>,
    Extension(ctx): Extension<AuthContext>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<PublicAccount>, ApiError> {
    let account = state.service.update_profile(ctx.account_id, patch).await?;
    Ok(Json(account))
}
