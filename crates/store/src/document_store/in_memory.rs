use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::json;

use super::r#trait::{DocumentStore, StoreError};
use crate::document::BookDocument;

/// In-memory document store.
///
/// Intended for tests/dev. Stamps synthetic bookkeeping fields on every write
/// so the stripping path behaves like it does against the managed store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<HashMap<String, BookDocument>>,
    revision: AtomicU64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn stamp(&self, doc: &mut BookDocument) {
        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        doc.system.insert("_rid".into(), json!(format!("mem-{revision}")));
        doc.system.insert("_etag".into(), json!(format!("\"{revision}\"")));
        doc.system.insert("_ts".into(), json!(revision));
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, mut doc: BookDocument) -> Result<BookDocument, StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Request("lock poisoned".to_string()))?;

        if docs.contains_key(&doc.id) {
            return Err(StoreError::DuplicateKey(doc.id));
        }

        self.stamp(&mut doc);
        docs.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    async fn query_all(&self) -> Result<Vec<BookDocument>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Request("lock poisoned".to_string()))?;

        Ok(docs.values().cloned().collect())
    }

    async fn query_by_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<BookDocument>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Request("lock poisoned".to_string()))?;

        Ok(docs
            .values()
            .filter(|doc| doc.field(key) == Some(value))
            .cloned()
            .collect())
    }

    async fn replace(
        &self,
        existing: &BookDocument,
        mut new_doc: BookDocument,
    ) -> Result<BookDocument, StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Request("lock poisoned".to_string()))?;

        if !docs.contains_key(&existing.id) {
            return Err(StoreError::NotFound(existing.id.clone()));
        }

        self.stamp(&mut new_doc);
        docs.insert(existing.id.clone(), new_doc.clone());
        Ok(new_doc)
    }

    async fn delete(&self, id: &str, partition_key: &str) -> Result<(), StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Request("lock poisoned".to_string()))?;

        // A point delete addresses (id, partition key); a stale partition key
        // misses, same as against the managed store.
        match docs.get(id) {
            Some(doc) if doc.category == partition_key => {
                docs.remove(id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
