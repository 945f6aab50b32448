use thiserror::Error;

use crate::NoteId;

/// Error types for the service layer
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Registration attempted with a username that is already taken
    #[error("User '{0}' already exists")]
    AlreadyExists(String),

    /// Login failed. Deliberately silent about which half of the pair was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No note with the given identifier (or none visible to the caller)
    #[error("Note {0} not found")]
    NotFound(NoteId),

    /// Note submission was empty after trimming
    #[error("Note content is empty")]
    EmptyContent,

    /// Hashing failed or the hashing task could not complete
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// Type alias for Result with ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;
