//! CareVault Server — HTTP layer over the account service.
//!
//! Routing, the bearer-token auth gate, request/response DTOs, and the
//! mapping from domain errors to HTTP responses live here; everything
//! with an invariant lives below in `carevault-auth` and
//! `carevault-db`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
