use async_trait::async_trait;
use thiserror::Error;

use std::sync::Arc;

use crate::document::BookDocument;

/// Document store operation error.
///
/// These are **infrastructure errors** (wire, auth, key collisions) as
/// opposed to domain errors (validation, unknown titles). The directory maps
/// `DuplicateKey`/`NotFound` onto their domain counterparts and forwards the
/// rest uncategorized.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with this id already exists in the container.
    #[error("duplicate document id: {0}")]
    DuplicateKey(String),

    /// A point operation referenced a document that is not there.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Anything else the store reports (network, throttling, auth).
    #[error("store request failed: {0}")]
    Request(String),
}

/// The handful of container operations the directory needs.
///
/// Point insert, full scan, key lookup, full-document replace, point delete —
/// nothing more. Any concrete database can implement this: tests run against
/// [`super::InMemoryDocumentStore`], production against
/// [`super::CosmosDocumentStore`].
///
/// Point operations (replace, delete) address a document by id **and**
/// partition key value, which is why mutating callers must locate the stored
/// document first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Fails with [`StoreError::DuplicateKey`] when
    /// the id is already taken.
    async fn insert(&self, doc: BookDocument) -> Result<BookDocument, StoreError>;

    /// Every document in the container, in store order (none guaranteed).
    async fn query_all(&self) -> Result<Vec<BookDocument>, StoreError>;

    /// Documents whose `key` field equals `value`.
    async fn query_by_key(&self, key: &str, value: &str)
        -> Result<Vec<BookDocument>, StoreError>;

    /// Full-body replace of the document at `existing`'s location.
    async fn replace(
        &self,
        existing: &BookDocument,
        new_doc: BookDocument,
    ) -> Result<BookDocument, StoreError>;

    /// Point delete by (id, partition key value).
    async fn delete(&self, id: &str, partition_key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn insert(&self, doc: BookDocument) -> Result<BookDocument, StoreError> {
        (**self).insert(doc).await
    }

    async fn query_all(&self) -> Result<Vec<BookDocument>, StoreError> {
        (**self).query_all().await
    }

    async fn query_by_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<BookDocument>, StoreError> {
        (**self).query_by_key(key, value).await
    }

    async fn replace(
        &self,
        existing: &BookDocument,
        new_doc: BookDocument,
    ) -> Result<BookDocument, StoreError> {
        (**self).replace(existing, new_doc).await
    }

    async fn delete(&self, id: &str, partition_key: &str) -> Result<(), StoreError> {
        (**self).delete(id, partition_key).await
    }
}
