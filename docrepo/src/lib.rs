//! Main docrepo crate providing an in-memory document repository.
//!
//! This crate is the primary entry point for users of docrepo. It re-exports the core
//! types from the sub-crates and provides access to the storage backend.
//!
//! # Features
//!
//! - **Upsert** - `save` inserts a document or replaces the stored one with the same id
//! - **Lookup** - `find_by_id` ignores whitespace around ids
//! - **Search** - `search` filters by title prefix, content, author and creation time
//!
//! # Quick Start
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::InMemoryStore};
//! use docrepo::chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!
//!     let saved = store
//!         .save(
//!             Document::builder()
//!                 .with_title("Hello World")
//!                 .with_content("foo")
//!                 .with_author(Author::new("a1", "Alice"))
//!                 .with_created(Utc::now())
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     let results = store
//!         .search(
//!             SearchRequest::builder()
//!                 .title_prefix("hel")
//!                 .author_id("a1")
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(results, vec![saved]);
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! A typed `DocumentStore` converts into a `DynDocumentStore` with `into_dyn`, which
//! allows the backend to be selected at runtime. `into_static` recovers the typed store.
//!
//! ```ignore
//! let dyn_store = DocumentStore::new(InMemoryStore::new()).into_dyn();
//! dyn_store.save(Document::default()).await.unwrap();
//!
//! let store = dyn_store.into_static::<InMemoryStore>().unwrap();
//! ```

pub mod prelude;

pub use docrepo_core::{backend, document, error, query, store};

// Re-export chrono so callers can build timestamps without a separate dependency
pub use chrono;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docrepo_memory::{InMemoryStore, InMemoryStoreBuilder};
}
