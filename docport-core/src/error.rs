//! Error types and result types for document store operations.
//!
//! This module provides error handling for every store access, path manipulation and
//! tree (de)serialization step. Use [`DocumentStoreResult<T>`] as the return type for
//! fallible operations.

use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;

/// Represents all possible errors that can occur while exporting or importing a store tree.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting between document formats.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A collection or document path is malformed.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    /// An exported tree does not have the expected shape.
    /// The first argument is the path at which the problem was found.
    #[error("Invalid tree at {0}: {1}")]
    InvalidTree(String, String),
    /// Reading from the store failed at the given path.
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },
    /// Writing to the store failed at the given path.
    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// Reading or writing a tree file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl DocumentStoreError {
    /// Wraps this error as a read failure at `path`.
    ///
    /// Errors that already carry a path are passed through unchanged so the innermost
    /// failing path is the one reported.
    pub fn reading(self, path: impl ToString) -> Self {
        match self {
            err @ (Self::Read { .. } | Self::Write { .. } | Self::InvalidTree(..)) => err,
            other => Self::Read {
                path: path.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Wraps this error as a write failure at `path`.
    pub fn writing(self, path: impl ToString) -> Self {
        match self {
            err @ (Self::Read { .. } | Self::Write { .. } | Self::InvalidTree(..)) => err,
            other => Self::Write {
                path: path.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<IoError> for DocumentStoreError {
    fn from(err: IoError) -> Self {
        DocumentStoreError::Io(err.to_string())
    }
}
