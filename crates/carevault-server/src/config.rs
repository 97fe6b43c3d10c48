//! Server configuration, read from the environment once at startup.

use anyhow::{Context, bail};
use carevault_auth::AuthConfig;
use carevault_db::DbConfig;
use tracing::warn;

/// Everything the process needs, assembled before anything else runs.
/// Read-only afterwards; handed down by value, never via globals.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub listen_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Allowed CORS origins; `*` means any.
    pub cors_origins: String,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Load configuration from `CAREVAULT_*` environment variables.
    ///
    /// The JWT secret must be provided explicitly when
    /// `CAREVAULT_ENV=production`; in development a default is accepted
    /// with a warning.
    pub fn from_env() -> anyhow::Result<Self> {
        let production = env_or("CAREVAULT_ENV", "development") == "production";

        let jwt_secret = match std::env::var("CAREVAULT_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if production => {
                bail!("CAREVAULT_JWT_SECRET must be set in production")
            }
            _ => {
                warn!("Using default JWT secret - set CAREVAULT_JWT_SECRET for production");
                "carevault-dev-secret-change-in-production".to_string()
            }
        };

        let token_ttl_secs = env_or("CAREVAULT_TOKEN_TTL_SECS", "604800")
            .parse::<u64>()
            .context("CAREVAULT_TOKEN_TTL_SECS must be an integer")?;

        let auth = AuthConfig {
            jwt_secret,
            token_ttl_secs,
            pepper: std::env::var("CAREVAULT_PEPPER").ok().filter(|p| !p.is_empty()),
            ..AuthConfig::default()
        };

        let db = DbConfig {
            url: env_or("CAREVAULT_DB_URL", "127.0.0.1:8000"),
            namespace: env_or("CAREVAULT_DB_NS", "carevault"),
            database: env_or("CAREVAULT_DB_NAME", "main"),
            username: env_or("CAREVAULT_DB_USER", "root"),
            password: env_or("CAREVAULT_DB_PASS", "root"),
        };

        Ok(Self {
            listen_addr: env_or("CAREVAULT_LISTEN_ADDR", "0.0.0.0:8080"),
            db,
            auth,
            cors_origins: env_or("CAREVAULT_CORS_ORIGINS", "*"),
        })
    }
}
