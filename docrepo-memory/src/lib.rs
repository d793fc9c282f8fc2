//! In-memory document storage backend for docrepo.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access.
//!
//! # Features
//!
//! - **Store order** - Documents are returned in insertion order; re-saving an id moves it to the end
//! - **Indexed upsert** - Replacing or deleting a document by id does not rescan the store
//! - **Full search support** - Evaluates every `SearchRequest` criterion
//!
//! # Quick Start
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let store = DocumentStore::new(backend);
//!
//!     let saved = store
//!         .save(Document::builder().with_title("Hello").build())
//!         .await?;
//!
//!     assert!(store.find_by_id(saved.id()).await?.is_some());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_memory;

pub mod store;
pub(crate) mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
