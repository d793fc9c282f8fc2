//! An in-memory document repository with upsert, exact lookup and multi-criteria search.
//!
//! This crate is the core of the docrepo project and provides:
//!
//! - **Document model** ([`document`]) - Documents, authors and JSON conversion
//! - **Search requests** ([`query`]) - Optional search criteria and the visitor that evaluates them
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Document store** ([`store`]) - `save`, `search` and `find_by_id` over any backend
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//!
//! let saved = store
//!     .save(
//!         Document::builder()
//!             .with_title("Hello World")
//!             .with_author(Author::new("a1", "Alice"))
//!             .build(),
//!     )
//!     .await?;
//!
//! let hits = store
//!     .search(SearchRequest::builder().title_prefix("hel").build())
//!     .await?;
//!
//! assert_eq!(hits, vec![saved]);
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
