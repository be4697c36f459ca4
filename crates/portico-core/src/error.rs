//! Error types for the directory.

use thiserror::Error;

/// Error taxonomy shared by all directory layers.
///
/// Callers receive one of these kinds, never a raw backend error, so
/// transport code can map conditions to status codes without
/// inspecting backend-specific text.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("entity already exists: {entity} with id {id}")]
    Conflict { entity: String, id: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    /// A logical attribute has no storage-key mapping. This is a
    /// registry misconfiguration, not a user-facing condition.
    #[error("no storage key for {entity}.{field}")]
    KeyNotFound { entity: String, field: String },

    /// Backend unreachable or transiently failing. Safe to retry.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    /// Shorthand for a [`DirectoryError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        DirectoryError::Validation {
            message: message.into(),
        }
    }

    /// Whether the caller may retry the operation as-is.
    ///
    /// Only transient backend failures qualify; validation and
    /// not-found conditions will fail identically on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DirectoryError::Unavailable(_))
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
