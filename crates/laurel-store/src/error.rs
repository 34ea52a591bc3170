//! Error types for laurel-store

use thiserror::Error;

/// Storage error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Document not found: {collection}/{key}")]
    NotFound {
        collection: &'static str,
        key: String,
    },

    #[error("Document already exists: {collection}/{key}")]
    AlreadyExists {
        collection: &'static str,
        key: String,
    },

    #[error("Stored document corrupt at {collection}/{key}: {detail}")]
    Corrupt {
        collection: &'static str,
        key: String,
        detail: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Missing-document error for a collection and key
    pub fn not_found(collection: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound {
            collection,
            key: key.into(),
        }
    }

    /// Duplicate-create error for a collection and key
    pub fn already_exists(collection: &'static str, key: impl Into<String>) -> Self {
        Error::AlreadyExists {
            collection,
            key: key.into(),
        }
    }

    /// Whether this error is a missing document
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
