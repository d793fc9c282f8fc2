//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that abstract over storage implementations, so the
//! [`DocumentStore`](crate::store::DocumentStore) front-end can work with any backend
//! that keeps documents in store order.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances

use async_trait::async_trait;
use std::{any::Any, fmt::Debug};

use crate::{document::Document, error::DocumentStoreResult, query::SearchRequest};

/// Abstract interface for document storage backends.
///
/// A backend owns every document handed to it and keeps them in *store order*:
/// insertion order, except that replacing a document moves it to the end.
/// Documents returned from a backend are independent copies.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Whether concurrent writers are serialized
/// through a lock or rejected is implementation-specific and should be documented
/// by the implementer.
///
/// # Error Handling
///
/// Operations return [`DocumentStoreResult<T>`](crate::error::DocumentStoreResult).
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Stores a document, replacing any stored document with exactly the same id.
    ///
    /// The document is appended at the end of the store order whether or not it
    /// replaced an earlier version. Ids are compared exactly, without trimming.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to store. Its `id` must be set.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or a [`DocumentStoreError`](crate::error::DocumentStoreError)
    /// if the document has no id or the backend fails.
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()>;

    /// Looks a document up by id, ignoring leading and trailing whitespace.
    ///
    /// Both the requested id and every stored id are trimmed before comparing. When
    /// several stored ids match, the earliest in store order wins.
    ///
    /// # Arguments
    ///
    /// * `id` - The id to look up
    ///
    /// # Returns
    ///
    /// Returns a copy of the matching document, `None` if nothing matches, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;

    /// Searches stored documents using a multi-criteria request.
    ///
    /// # Arguments
    ///
    /// * `request` - The [`SearchRequest`] whose active criteria must all match
    ///
    /// # Returns
    ///
    /// Returns copies of every matching document in store order. If an active criterion
    /// inspects a field some stored document lacks, the whole search fails with
    /// [`DocumentStoreError::MissingField`](crate::error::DocumentStoreError::MissingField)
    /// and no partial result is returned.
    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>>;

    /// Removes a document by its exact id.
    ///
    /// Deleting an id that is not stored is not an error.
    ///
    /// # Arguments
    ///
    /// * `id` - The exact id of the document to remove
    ///
    /// # Returns
    ///
    /// Returns the removed document, `None` if the id was not stored, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn delete_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;

    /// Lists every stored document.
    ///
    /// # Returns
    ///
    /// Returns copies of all documents in store order, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn list_documents(&self) -> DocumentStoreResult<Vec<Document>>;

    /// Counts the stored documents.
    ///
    /// # Returns
    ///
    /// Returns the number of stored documents, or a
    /// [`DocumentStoreError`](crate::error::DocumentStoreError) on failure.
    async fn count_documents(&self) -> DocumentStoreResult<usize>;

    /// Releases the backend. The default implementation does nothing.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Object-safe counterpart of [`StoreBackend`], implemented for every backend.
///
/// Used by [`DynDocumentStore`](crate::store::DynDocumentStore) to select a backend at runtime.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()>;
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;
    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>>;
    async fn delete_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;
    async fn list_documents(&self) -> DocumentStoreResult<Vec<Document>>;
    async fn count_documents(&self) -> DocumentStoreResult<usize>;
    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()>;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

#[async_trait]
impl<B: StoreBackend + 'static> DynStoreBackend for B {
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
        StoreBackend::upsert_document(self, document).await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        StoreBackend::get_document(self, id).await
    }

    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        StoreBackend::search_documents(self, request).await
    }

    async fn delete_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        StoreBackend::delete_document(self, id).await
    }

    async fn list_documents(&self) -> DocumentStoreResult<Vec<Document>> {
        StoreBackend::list_documents(self).await
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        StoreBackend::count_documents(self).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(*self).await
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Factory trait for constructing backends from configuration.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
