//! Core types for document representation and serialization.
//!
//! A [`Document`] is a plain record with public fields. Every field is optional:
//! the store only requires an id once a document has been saved, and it generates
//! one when the caller leaves it unset. Validation of the remaining fields is the
//! caller's responsibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::DocumentStoreResult;

/// The author of a document.
///
/// Authors have no lifecycle of their own; they are embedded by value in the
/// document that references them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Author {
    /// Identifier matched by [`SearchRequest::author_ids`](crate::query::SearchRequest::author_ids).
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Author {
    /// Creates a new author.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A document held by a document store.
///
/// # Example
///
/// ```ignore
/// use docrepo::document::{Author, Document};
/// use chrono::Utc;
///
/// let document = Document::builder()
///     .with_title("Hello World")
///     .with_content("foo")
///     .with_author(Author::new("a1", "Alice"))
///     .with_created(Utc::now())
///     .build();
///
/// assert!(document.id.is_none());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Unique key. Generated by [`DocumentStore::save`](crate::store::DocumentStore::save) when `None`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    /// Creation timestamp. Set by the caller and never modified by the store.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates a new builder for constructing a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Returns the document id, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Builder for constructing [`Document`] instances with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.document.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.document.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.document.content = Some(content.into());
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.document.author = Some(author);
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.document.created = Some(created);
        self
    }

    /// Builds and returns the document.
    pub fn build(self) -> Document {
        self.document
    }
}

/// Extension trait providing JSON conversion for documents.
pub trait DocumentExt: Sized {
    /// Converts this document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_json(&self) -> DocumentStoreResult<Value>;

    /// Creates a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_json(value: Value) -> DocumentStoreResult<Self>;
}

impl DocumentExt for Document {
    fn to_json(&self) -> DocumentStoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> DocumentStoreResult<Self> {
        Ok(from_value(value)?)
    }
}
