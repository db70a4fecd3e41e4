use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use filmoteca_core::{Document, DocumentId};

use crate::store::query::FindQuery;

/// Store operation error.
///
/// These are **infrastructure errors**; a missing document is never an error
/// (finds return an empty list, writes report zero counts).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("document conversion failed: {0}")]
    Conversion(String),

    #[error("corrupt document: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn backend(err: impl core::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn conversion(err: impl core::fmt::Display) -> Self {
        Self::Conversion(err.to_string())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of an insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

/// Outcome of an update.
///
/// `matched_count == 0` covers both "no such document" and a malformed
/// target; callers cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<DocumentId>,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Collection-oriented document store.
///
/// ## Contract
///
/// - `insert_one` assigns a fresh identifier, discarding any `_id` in the
///   document, and returns it.
/// - `update_one` sets the given fields on the matched document (fields not
///   mentioned are kept). An `_id` key in `fields` is ignored.
/// - `find` returns documents in insertion order unless a sort is requested,
///   and never fails because nothing matched.
/// - Each call is a single atomic operation; there is no cross-call
///   coordination, so concurrent writers race and the last one wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>>;

    async fn insert_one(&self, collection: &str, doc: Document) -> StoreResult<InsertOneResult>;

    async fn update_one(
        &self,
        collection: &str,
        id: DocumentId,
        fields: Document,
    ) -> StoreResult<UpdateResult>;

    async fn delete_one(&self, collection: &str, id: DocumentId) -> StoreResult<DeleteResult>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn find(&self, collection: &str, query: &FindQuery) -> StoreResult<Vec<Document>> {
        (**self).find(collection, query).await
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> StoreResult<InsertOneResult> {
        (**self).insert_one(collection, doc).await
    }

    async fn update_one(
        &self,
        collection: &str,
        id: DocumentId,
        fields: Document,
    ) -> StoreResult<UpdateResult> {
        (**self).update_one(collection, id, fields).await
    }

    async fn delete_one(&self, collection: &str, id: DocumentId) -> StoreResult<DeleteResult> {
        (**self).delete_one(collection, id).await
    }
}
