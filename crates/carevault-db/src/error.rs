//! Database-specific error types and conversions.

use carevault_core::error::VaultError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// Unique-index rejection — surfaced as a conflict, never as an
    /// internal failure.
    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl From<DbError> for VaultError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => VaultError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => VaultError::AlreadyExists { entity },
            other => VaultError::Database(other.to_string()),
        }
    }
}
