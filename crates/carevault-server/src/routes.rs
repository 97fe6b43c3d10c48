//! Route table.

use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::json;
use surrealdb::Connection;

use crate::handlers::{auth, profile};
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn router<C: Connection>(state: AppState<C>) -> Router {
    let protected = Router::new()
        .route(
            "/api/profile",
            get(profile::get_profile::<C>).patch(profile::update_profile::<C>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<C>,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/signup", post(auth::sign_up::<C>))
        .route("/api/auth/signin", post(auth::sign_in::<C>))
        .merge(protected)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
