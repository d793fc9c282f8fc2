//! Search request construction and a visitor for evaluating its criteria.
//!
//! A [`SearchRequest`] carries five independent, optional criteria. Absent or empty
//! criteria impose no constraint. Active criteria combine with logical AND, and the
//! values inside a multi-valued criterion combine with logical OR.
//!
//! # Request Building
//!
//! ```ignore
//! use docrepo::query::SearchRequest;
//!
//! let request = SearchRequest::builder()
//!     .title_prefix("hel")
//!     .author_ids(["a1", "a2"])
//!     .created_from(since)
//!     .build();
//! ```
//!
//! # Evaluation
//!
//! Backends implement [`SearchVisitor`] for a single document and call
//! [`SearchVisitor::visit_request`], which walks the active [`Criterion`] values in
//! a fixed order and stops at the first one that rejects the document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DocumentStoreError;

/// A multi-criteria search over stored documents.
///
/// Text criteria (`title_prefixes`, `contains_contents`) compare case-insensitively.
/// `author_ids` compares case-sensitively. Both timestamp bounds are inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    /// The title must start with at least one of these prefixes.
    pub title_prefixes: Vec<String>,
    /// The content must contain at least one of these substrings.
    pub contains_contents: Vec<String>,
    /// The author id must equal one of these ids.
    pub author_ids: Vec<String>,
    /// Inclusive lower bound on `created`.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created`.
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    /// Creates a request with no criteria. It matches every stored document.
    pub fn new() -> Self {
        SearchRequest::default()
    }

    /// Creates a new request builder for fluent construction.
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }

    /// Returns the active criteria, in evaluation order.
    pub fn criteria(&self) -> impl Iterator<Item = Criterion<'_>> {
        let title_prefixes = (!self.title_prefixes.is_empty())
            .then(|| Criterion::TitlePrefixes(&self.title_prefixes));
        let contains_contents = (!self.contains_contents.is_empty())
            .then(|| Criterion::ContainsContents(&self.contains_contents));
        let author_ids = (!self.author_ids.is_empty())
            .then(|| Criterion::AuthorIds(&self.author_ids));

        [
            title_prefixes,
            contains_contents,
            author_ids,
            self.created_from.map(Criterion::CreatedFrom),
            self.created_to.map(Criterion::CreatedTo),
        ]
        .into_iter()
        .flatten()
    }
}

/// A single active criterion borrowed from a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion<'a> {
    /// Case-insensitive title prefix match against any of the values.
    TitlePrefixes(&'a [String]),
    /// Case-insensitive content substring match against any of the values.
    ContainsContents(&'a [String]),
    /// Exact author id match against any of the values.
    AuthorIds(&'a [String]),
    /// `created >= bound`.
    CreatedFrom(DateTime<Utc>),
    /// `created <= bound`.
    CreatedTo(DateTime<Utc>),
}

#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    /// Creates a new request builder.
    pub fn new() -> Self {
        SearchRequestBuilder { request: SearchRequest::default() }
    }

    /// Adds one accepted title prefix.
    pub fn title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.request.title_prefixes.push(prefix.into());
        self
    }

    /// Adds several accepted title prefixes.
    pub fn title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.title_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Adds one accepted content substring.
    pub fn contains_content(mut self, needle: impl Into<String>) -> Self {
        self.request.contains_contents.push(needle.into());
        self
    }

    /// Adds several accepted content substrings.
    pub fn contains_contents<I, S>(mut self, needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.contains_contents.extend(needles.into_iter().map(Into::into));
        self
    }

    /// Adds one accepted author id.
    pub fn author_id(mut self, id: impl Into<String>) -> Self {
        self.request.author_ids.push(id.into());
        self
    }

    /// Adds several accepted author ids.
    pub fn author_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.author_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the inclusive lower bound on `created`.
    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.request.created_from = Some(from);
        self
    }

    /// Sets the inclusive upper bound on `created`.
    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.request.created_to = Some(to);
        self
    }

    /// Builds and returns the final request.
    pub fn build(self) -> SearchRequest {
        self.request
    }
}

/// Evaluates search criteria against one subject, typically a single document.
///
/// Implementors answer each criterion individually; [`visit_request`](Self::visit_request)
/// combines them with short-circuiting AND, so criteria after the first rejection are
/// never evaluated.
pub trait SearchVisitor {
    type Error: Into<DocumentStoreError>;

    fn visit_title_prefixes(&mut self, prefixes: &[String]) -> Result<bool, Self::Error>;
    fn visit_contains_contents(&mut self, needles: &[String]) -> Result<bool, Self::Error>;
    fn visit_author_ids(&mut self, ids: &[String]) -> Result<bool, Self::Error>;
    fn visit_created_from(&mut self, from: &DateTime<Utc>) -> Result<bool, Self::Error>;
    fn visit_created_to(&mut self, to: &DateTime<Utc>) -> Result<bool, Self::Error>;

    fn visit_criterion(&mut self, criterion: &Criterion<'_>) -> Result<bool, Self::Error> {
        match criterion {
            Criterion::TitlePrefixes(prefixes) => self.visit_title_prefixes(prefixes),
            Criterion::ContainsContents(needles) => self.visit_contains_contents(needles),
            Criterion::AuthorIds(ids) => self.visit_author_ids(ids),
            Criterion::CreatedFrom(from) => self.visit_created_from(from),
            Criterion::CreatedTo(to) => self.visit_created_to(to),
        }
    }

    fn visit_request(&mut self, request: &SearchRequest) -> Result<bool, Self::Error> {
        for criterion in request.criteria() {
            if !self.visit_criterion(&criterion)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
