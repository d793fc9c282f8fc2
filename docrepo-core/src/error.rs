//! Error types and result types for document store operations.
//!
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentStoreError {
    /// The caller passed an argument the operation cannot act on, such as saving no document.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An active search criterion inspected a field the stored document does not have.
    ///
    /// The whole search is aborted; no partial result is returned.
    #[error("Document {id} has no {field} to evaluate against the search request")]
    MissingField {
        /// Id of the offending stored document.
        id: String,
        /// Name of the missing field (`title`, `content`, `author`, `created`).
        field: &'static str,
    },
    /// Serialization/deserialization error when converting documents to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
