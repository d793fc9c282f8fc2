//! Main document store interface.
//!
//! This module provides the API callers use to work with a repository of documents:
//!
//! - [`DocumentStore`] - Typed store for working with a specific backend implementation
//! - [`DynDocumentStore`] - Dynamic dispatch store for runtime backend selection
//!
//! Both expose the same operations. [`save`](DocumentStore::save) upserts a document,
//! generating its id when absent. [`search`](DocumentStore::search) filters by a
//! [`SearchRequest`]. [`find_by_id`](DocumentStore::find_by_id) looks a document up
//! by id, ignoring surrounding whitespace.
//!
//! # Example
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! let saved = store.save(Document::builder().with_title("Hello").build()).await?;
//! let found = store.find_by_id(saved.id()).await?;
//! assert_eq!(found, Some(saved));
//! ```

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
    query::SearchRequest,
};

/// Validates a document passed to `save` and assigns a fresh id when it has none.
fn prepare_for_save(document: Option<Document>) -> DocumentStoreResult<Document> {
    let mut document = document.ok_or_else(|| {
        DocumentStoreError::InvalidArgument("cannot save an absent document".to_string())
    })?;

    if document.id.is_none() {
        let id = Uuid::new_v4().to_string();
        debug!(doc_id = %id, "Generated id for new document");
        document.id = Some(id);
    }

    Ok(document)
}

fn log_search_failure<T>(result: DocumentStoreResult<T>) -> DocumentStoreResult<T> {
    if let Err(DocumentStoreError::MissingField { id, field }) = &result {
        warn!(doc_id = %id, field = *field, "Search aborted on document missing a searched field");
    }

    result
}

/// A strongly-typed document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
///
/// # Example
///
/// ```ignore
/// let store = DocumentStore::new(InMemoryStore::new());
/// let saved = store.save(document).await?;
/// ```
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Upserts a document and returns the stored version.
    ///
    /// A document without an id gets a newly generated UUID. A document with an id
    /// replaces any stored document with exactly that id and moves to the end of the
    /// store order. No field is merged and `created` is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] if `document` is `None`; the
    /// store is left untouched.
    pub async fn save(&self, document: impl Into<Option<Document>>) -> DocumentStoreResult<Document> {
        let document = prepare_for_save(document.into())?;

        self.backend
            .upsert_document(document.clone())
            .await?;

        Ok(document)
    }

    /// Returns every stored document matching all active criteria, in store order.
    ///
    /// A `None` request yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::MissingField`] if an active criterion inspects a
    /// field that some stored document lacks. No partial result is returned.
    pub async fn search(&self, request: impl Into<Option<SearchRequest>>) -> DocumentStoreResult<Vec<Document>> {
        match request.into() {
            Some(request) => log_search_failure(self.backend.search_documents(&request).await),
            None => Ok(vec![]),
        }
    }

    /// Finds the first document in store order whose id matches `id`, ignoring
    /// leading and trailing whitespace on both sides. A `None` id finds nothing.
    pub async fn find_by_id<'a>(&self, id: impl Into<Option<&'a str>>) -> DocumentStoreResult<Option<Document>> {
        match id.into() {
            Some(id) => self.backend.get_document(id).await,
            None => Ok(None),
        }
    }

    /// Removes the document with exactly the given id, returning it if it was stored.
    pub async fn delete(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        self.backend.delete_document(id).await
    }

    /// Returns every stored document in store order.
    pub async fn list(&self) -> DocumentStoreResult<Vec<Document>> {
        self.backend.list_documents().await
    }

    /// Returns the number of stored documents.
    pub async fn count(&self) -> DocumentStoreResult<usize> {
        self.backend.count_documents().await
    }

    /// Shuts the store down, releasing its backend.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}

/// A document store whose backend is chosen at runtime.
///
/// Offers the same operations as [`DocumentStore`] through a boxed [`DynStoreBackend`].
#[derive(Debug)]
pub struct DynDocumentStore {
    backend: Box<dyn DynStoreBackend>,
}

impl DynDocumentStore {
    pub fn new(backend: Box<dyn DynStoreBackend>) -> Self {
        Self { backend }
    }

    /// See [`DocumentStore::save`].
    pub async fn save(&self, document: impl Into<Option<Document>>) -> DocumentStoreResult<Document> {
        let document = prepare_for_save(document.into())?;

        self.backend
            .upsert_document(document.clone())
            .await?;

        Ok(document)
    }

    /// See [`DocumentStore::search`].
    pub async fn search(&self, request: impl Into<Option<SearchRequest>>) -> DocumentStoreResult<Vec<Document>> {
        match request.into() {
            Some(request) => log_search_failure(self.backend.search_documents(&request).await),
            None => Ok(vec![]),
        }
    }

    /// See [`DocumentStore::find_by_id`].
    pub async fn find_by_id<'a>(&self, id: impl Into<Option<&'a str>>) -> DocumentStoreResult<Option<Document>> {
        match id.into() {
            Some(id) => self.backend.get_document(id).await,
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        self.backend.delete_document(id).await
    }

    pub async fn list(&self) -> DocumentStoreResult<Vec<Document>> {
        self.backend.list_documents().await
    }

    pub async fn count(&self) -> DocumentStoreResult<usize> {
        self.backend.count_documents().await
    }

    /// Shuts the store down. Dynamic backends are released through `shutdown_boxed`.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown_boxed().await
    }
}

/// Conversion trait for converting a document store into a dynamic owned store.
pub trait IntoDynDocumentStore {
    fn into_dyn(self) -> DynDocumentStore;
}

impl<B: StoreBackend + 'static> IntoDynDocumentStore for DocumentStore<B> {
    fn into_dyn(self) -> DynDocumentStore {
        DynDocumentStore::new(Box::new(self.backend))
    }
}

impl IntoDynDocumentStore for DynDocumentStore {
    fn into_dyn(self) -> DynDocumentStore {
        self
    }
}

/// Conversion trait for recovering a typed store from a dynamic one.
///
/// Returns `None` when the boxed backend is not a `B`.
pub trait IntoStaticDocumentStore {
    fn into_static<B>(self) -> Option<DocumentStore<B>>
    where
        B: StoreBackend + 'static;
}

impl IntoStaticDocumentStore for DynDocumentStore {
    fn into_static<B>(self) -> Option<DocumentStore<B>>
    where
        B: StoreBackend + 'static,
    {
        self.backend
            .into_any()
            .downcast::<B>()
            .ok()
            .map(|b| DocumentStore::new(*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_rejects_absent_document() {
        let err = prepare_for_save(None).unwrap_err();

        assert!(matches!(err, DocumentStoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_prepare_generates_distinct_ids() {
        let first = prepare_for_save(Some(Document::default())).unwrap();
        let second = prepare_for_save(Some(Document::default())).unwrap();

        assert!(first.id().is_some_and(|id| !id.is_empty()));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_prepare_keeps_existing_id() {
        let document = Document::builder().with_id("  keep-me ").build();
        let prepared = prepare_for_save(Some(document)).unwrap();

        assert_eq!(prepared.id(), Some("  keep-me "));
    }
}
