//! Store-level error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Durable-write or reload failure in a persistence adapter.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file exists but does not parse. Surfaced instead of being
    /// treated as empty, which would wipe the collection on the next flush.
    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors returned by [`DocumentStore`] operations.
///
/// [`DocumentStore`]: super::DocumentStore
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or malformed required fields - the caller's fault, never
    /// retried.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The identifier does not resolve in the named collection.
    #[error("{collection} {id} not found")]
    NotFound { collection: &'static str, id: String },

    /// The flush failed; in-memory state has been rolled back to the
    /// pre-mutation collection.
    #[error("persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Which collection a `NotFound` names, if any.
    pub fn missing_collection(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { collection, .. } => Some(collection),
            _ => None,
        }
    }
}
