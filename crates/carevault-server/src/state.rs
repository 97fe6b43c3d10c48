//! Shared application state.

use std::sync::Arc;

use carevault_auth::AuthConfig;
use carevault_auth::service::AccountService;
use carevault_db::SurrealAccountRepository;
use surrealdb::Connection;

/// State handed to every handler and the auth gate.
///
/// Built once in `main` (or a test harness) and cloned per request;
/// nothing in here is mutable after startup.
pub struct AppState<C: Connection> {
    pub service: Arc<AccountService<SurrealAccountRepository<C>>>,
}

impl<C: Connection> AppState<C> {
    pub fn new(service: AccountService<SurrealAccountRepository<C>>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn auth_config(&self) -> &AuthConfig {
        self.service.config()
    }
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
