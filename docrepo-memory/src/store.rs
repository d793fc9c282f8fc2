//! In-memory storage implementation for document stores.
//!
//! Documents are kept in a `BTreeMap` keyed by a monotonically increasing sequence
//! number, which is the store order, plus an id → sequence index. Re-saving an id
//! drops its old sequence entry and assigns a fresh one, moving the document to the
//! end without shifting any other entry.

use std::{collections::{BTreeMap, HashMap}, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use tracing::{debug, instrument};

use docrepo_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
    query::SearchRequest,
};

use crate::evaluator::DocumentEvaluator;

#[derive(Debug, Default)]
struct StoreState {
    /// Store order: sequence -> document
    documents: BTreeMap<u64, Document>,
    /// Exact document id -> sequence
    positions: HashMap<String, u64>,
    next_sequence: u64,
}

impl StoreState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: BTreeMap::new(),
            positions: HashMap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    fn upsert(&mut self, id: String, document: Document) -> bool {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let replaced = match self.positions.insert(id, sequence) {
            Some(previous) => self.documents.remove(&previous).is_some(),
            None => false,
        };

        self.documents.insert(sequence, document);

        replaced
    }

    fn remove(&mut self, id: &str) -> Option<Document> {
        let sequence = self.positions.remove(id)?;
        self.documents.remove(&sequence)
    }

    fn ordered(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }
}

/// Thread-safe in-memory document storage backend.
///
/// This struct implements the [`StoreBackend`] trait entirely in memory. Writers take
/// an exclusive async-aware lock and readers a shared one, so every read observes the
/// latest completed write.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state. Multiple
/// clones of the same instance share the same underlying data.
///
/// # Performance
///
/// Upsert and delete are `O(log n)`. Searches and id lookups scan every stored
/// document, since lookups ignore whitespace around ids.
///
/// # Example
///
/// ```ignore
/// use docrepo_memory::InMemoryStore;
/// use docrepo::backend::StoreBackend;
///
/// let store = InMemoryStore::new();
/// store.upsert_document(Document::builder().with_id("a").build()).await?;
/// assert_eq!(store.count_documents().await?, 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty store whose id index is pre-sized for `capacity` documents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::with_capacity(capacity))),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore` with custom options.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = InMemoryStore::builder().with_capacity(128).build().await?;
    /// ```
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    /// Stores `document` under a fresh sequence number, dropping the previous
    /// entry for the same id.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] if the document has no id.
    #[instrument(skip(self, document))]
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<()> {
        let id = document
            .id()
            .map(str::to_string)
            .ok_or_else(|| DocumentStoreError::InvalidArgument("cannot store a document without an id".to_string()))?;

        debug!(doc_id = %id, "Saving document to in-memory store");

        let replaced = self.state
            .write()
            .await
            .upsert(id, document);

        debug!(replaced, "Document saved");

        Ok(())
    }

    /// Scans in store order, since the index is keyed by untrimmed ids.
    #[instrument(skip(self))]
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        debug!("Getting document from in-memory store");
        let wanted = id.trim();

        Ok(
            self.state
                .read()
                .await
                .ordered()
                .find(|doc| doc.id().is_some_and(|id| id.trim() == wanted))
                .cloned()
        )
    }

    /// Evaluates `request` against every document under a single read lock.
    #[instrument(skip(self, request))]
    async fn search_documents(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        let state = self.state.read().await;
        let documents = DocumentEvaluator::filter_documents(state.ordered(), request)?;

        debug!(scanned = state.documents.len(), matched = documents.len(), "Searched in-memory store");

        Ok(documents)
    }

    /// Removes the document through the id index without scanning.
    #[instrument(skip(self))]
    async fn delete_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        debug!("Deleting document from in-memory store");

        Ok(self.state.write().await.remove(id))
    }

    /// Clones every document in store order.
    #[instrument(skip(self))]
    async fn list_documents(&self) -> DocumentStoreResult<Vec<Document>> {
        debug!("Listing all documents from in-memory store");

        Ok(
            self.state
                .read()
                .await
                .ordered()
                .cloned()
                .collect()
        )
    }

    /// Returns the number of entries in the ordered map.
    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        Ok(self.state.read().await.documents.len())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default, Debug, Clone)]
pub struct InMemoryStoreBuilder {
    capacity: usize,
}

impl InMemoryStoreBuilder {
    /// Pre-sizes the id index for the expected number of documents.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::with_capacity(self.capacity))
    }
}
