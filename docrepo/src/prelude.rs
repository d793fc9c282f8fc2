//! Convenient re-exports of commonly used types from docrepo.
//!
//! ```ignore
//! use docrepo::prelude::*;
//! ```

pub use docrepo_core::{
    store::{DocumentStore, DynDocumentStore, IntoDynDocumentStore, IntoStaticDocumentStore},
    document::{Author, Document, DocumentBuilder, DocumentExt},
    backend::{StoreBackend, DynStoreBackend, StoreBackendBuilder},
    query::{SearchRequest, SearchRequestBuilder, Criterion, SearchVisitor},
    error::{DocumentStoreError, DocumentStoreResult},
};
