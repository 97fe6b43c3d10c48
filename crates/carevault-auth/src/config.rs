//! Authentication configuration.

use crate::password::HashParams;

/// Configuration for the account service and token handling.
///
/// Built once at process start and read-only thereafter; every consumer
/// receives it by reference or clone — there are no ambient globals.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HS256 JWT signing and verification.
    /// Never logged, never returned to a client.
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds (default: 604_800 = 7 days).
    pub token_ttl_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Minimum password length accepted at signup.
    pub min_password_length: usize,
    /// Argon2id cost parameters.
    pub hash_params: HashParams,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 604_800,
            jwt_issuer: "carevault".into(),
            pepper: None,
            min_password_length: 6,
            hash_params: HashParams::default(),
        }
    }
}
