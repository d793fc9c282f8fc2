//! Search criteria evaluation for in-memory document filtering.
//!
//! Text criteria are compared after lower-casing both sides; the request side is folded
//! once per search through [`FoldedRequest`]. A document that lacks the
//! field an active criterion inspects cannot be evaluated, and the error aborts the
//! whole filter pass instead of silently dropping the document.

use chrono::{DateTime, Utc};

use docrepo_core::{
    document::{Author, Document},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{SearchRequest, SearchVisitor},
};

/// A search request whose title prefixes and content needles are already lower-cased.
pub(crate) struct FoldedRequest(SearchRequest);

impl FoldedRequest {
    pub fn new(request: &SearchRequest) -> Self {
        Self(SearchRequest {
            title_prefixes: fold_case(&request.title_prefixes),
            contains_contents: fold_case(&request.contains_contents),
            author_ids: request.author_ids.clone(),
            created_from: request.created_from,
            created_to: request.created_to,
        })
    }
}

fn fold_case(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.to_lowercase())
        .collect()
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, request: &FoldedRequest) -> DocumentStoreResult<bool> {
        self.visit_request(&request.0)
    }

    /// Clones every document matching `request`, preserving iteration order.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        request: &SearchRequest,
    ) -> DocumentStoreResult<Vec<Document>> {
        let request = FoldedRequest::new(request);
        let mut matched = Vec::new();

        for document in documents {
            if DocumentEvaluator::new(document).evaluate(&request)? {
                matched.push(document.clone());
            }
        }

        Ok(matched)
    }

    fn missing(&self, field: &'static str) -> DocumentStoreError {
        DocumentStoreError::MissingField {
            id: self.document.id().unwrap_or_default().to_string(),
            field,
        }
    }

    fn title(&self) -> DocumentStoreResult<&'a str> {
        self.document
            .title
            .as_deref()
            .ok_or_else(|| self.missing("title"))
    }

    fn content(&self) -> DocumentStoreResult<&'a str> {
        self.document
            .content
            .as_deref()
            .ok_or_else(|| self.missing("content"))
    }

    fn author(&self) -> DocumentStoreResult<&'a Author> {
        self.document
            .author
            .as_ref()
            .ok_or_else(|| self.missing("author"))
    }

    fn created(&self) -> DocumentStoreResult<DateTime<Utc>> {
        self.document
            .created
            .ok_or_else(|| self.missing("created"))
    }
}

impl<'a> SearchVisitor for DocumentEvaluator<'a> {
    type Error = DocumentStoreError;

    fn visit_title_prefixes(&mut self, prefixes: &[String]) -> Result<bool, Self::Error> {
        let title = self.title()?.to_lowercase();

        Ok(
            prefixes
                .iter()
                .any(|prefix| title.starts_with(prefix.as_str()))
        )
    }

    fn visit_contains_contents(&mut self, needles: &[String]) -> Result<bool, Self::Error> {
        let content = self.content()?.to_lowercase();

        Ok(
            needles
                .iter()
                .any(|needle| content.contains(needle.as_str()))
        )
    }

    fn visit_author_ids(&mut self, ids: &[String]) -> Result<bool, Self::Error> {
        let author = self.author()?;

        Ok(ids.iter().any(|id| *id == author.id))
    }

    fn visit_created_from(&mut self, from: &DateTime<Utc>) -> Result<bool, Self::Error> {
        Ok(self.created()? >= *from)
    }

    fn visit_created_to(&mut self, to: &DateTime<Utc>) -> Result<bool, Self::Error> {
        Ok(self.created()? <= *to)
    }
}
