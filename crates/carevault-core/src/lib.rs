//! CareVault Core — shared domain models, the account repository trait,
//! and the error taxonomy used across all crates.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{VaultError, VaultResult};
pub use repository::AccountRepository;
