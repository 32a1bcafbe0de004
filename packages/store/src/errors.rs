use thiserror::Error;

use crate::models::NoteId;

/// Errors surfaced by note operations. Each one is handled where it occurs
/// (form submit, file intake, repository lookup) and never escapes the UI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("note not found: {0}")]
    NotFound(NoteId),

    #[error("image \"{name}\" is {size} bytes, images must be at most {limit} bytes")]
    OversizeAttachment { name: String, size: u64, limit: u64 },

    #[error("invalid image payload: {0}")]
    InvalidImage(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("a note holds at most {max} images")]
    TooManyImages { max: usize },
}

/// Failures of a [`crate::KeyValueStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend is not available")]
    Unavailable,

    #[error("failed to read \"{key}\": {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write \"{key}\": {reason}")]
    Write { key: String, reason: String },

    #[error("failed to encode notes: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;
