//! Database-specific error types and conversions.

use portico_core::DirectoryError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("record already exists: {entity} with id {id}")]
    Conflict { entity: String, id: String },
}

impl From<DbError> for DirectoryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => DirectoryError::NotFound { entity, id },
            DbError::Conflict { entity, id } => DirectoryError::Conflict { entity, id },
            // Transport and statement failures are transient from
            // the caller's point of view; retry is the caller's
            // decision.
            DbError::Surreal(e) => DirectoryError::Unavailable(e.to_string()),
            DbError::Migration(msg) => DirectoryError::Unavailable(msg),
        }
    }
}
