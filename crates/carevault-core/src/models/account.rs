//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account, as held by the credential store.
///
/// `password_digest` is the salted Argon2id digest of the account's
/// password. It never crosses the HTTP boundary — every operation that
/// returns account data to a caller returns [`PublicAccount`] instead.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique lookup key; always stored trimmed and lowercased.
    pub email: String,
    pub password_digest: String,
    /// Opaque nested sub-structures (address, medical, insurance).
    /// The core stores and returns these untouched.
    pub profile: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The digest-stripped projection of an [`Account`] that is safe to
/// serialize into responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            profile: account.profile,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Input for account creation.
///
/// Carries the already-computed password digest — the account service
/// hashes, the store only ever persists the digest.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub first_name: String,
    pub last_name: String,
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    pub password_digest: String,
    pub profile: Option<serde_json::Value>,
}

/// Partial update of an account's non-credential fields.
///
/// There is deliberately no way to express an email or password change
/// through this type; the profile route must not double as a
/// credential-change endpoint.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Full replacement of the opaque profile document. Callers that
    /// want merge semantics merge before calling the store.
    pub profile: Option<serde_json::Value>,
}
