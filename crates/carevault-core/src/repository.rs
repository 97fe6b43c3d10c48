//! Repository trait definition for data access abstraction.
//!
//! The credential store is the only component that reads or writes
//! `password_digest`. All operations are async.

use uuid::Uuid;

use crate::error::VaultResult;
use crate::models::account::{Account, CreateAccount, UpdateAccount};

pub trait AccountRepository: Send + Sync {
    /// Persist a new account.
    ///
    /// Returns `VaultError::AlreadyExists` when the unique email index
    /// rejects the insert — the storage constraint, not the caller's
    /// pre-check, is the duplicate guarantee.
    fn create(&self, input: CreateAccount) -> impl Future<Output = VaultResult<Account>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = VaultResult<Account>> + Send;

    /// Look up by normalized email (the signin key).
    fn get_by_email(&self, email: &str) -> impl Future<Output = VaultResult<Account>> + Send;

    /// Apply a partial update to non-credential fields.
    fn update(
        &self,
        id: Uuid,
        input: UpdateAccount,
    ) -> impl Future<Output = VaultResult<Account>> + Send;
}
