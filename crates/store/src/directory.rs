//! The book directory service: validation plus pass-through store calls.

use std::sync::Arc;

use bookdir_core::{Book, BookPatch, DomainError, DomainResult};

use crate::document::BookDocument;
use crate::document_store::{DocumentStore, StoreError};

/// Directory of books keyed by title.
///
/// Holds the long-lived store handle (injected, safe for concurrent use) and
/// implements the four operations. Each one is a single round trip to the
/// store, or a lookup-then-mutate pair for update/delete; there are no
/// retries and no rollback. A concurrent update/delete race on the same title
/// can lose the update or surface the store's error — accepted limitation.
#[derive(Clone)]
pub struct BookDirectory {
    store: Arc<dyn DocumentStore>,
}

impl BookDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new book; the title becomes the document id.
    pub async fn create(
        &self,
        title: String,
        author: String,
        category: String,
    ) -> DomainResult<Book> {
        let book = Book::new(title, author, category)?;
        let doc = BookDocument::from_book(&book);

        match self.store.insert(doc).await {
            Ok(stored) => Ok(stored.into_book()),
            Err(StoreError::DuplicateKey(id)) => Err(DomainError::conflict(format!(
                "book '{id}' already exists"
            ))),
            Err(e) => Err(DomainError::store(e.to_string())),
        }
    }

    /// Every book, in store order.
    pub async fn list(&self) -> DomainResult<Vec<Book>> {
        let docs = self
            .store
            .query_all()
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;

        Ok(docs.into_iter().map(BookDocument::into_book).collect())
    }

    /// Replace the book's body, keeping `id`/`title` and retaining prior
    /// values for fields the patch leaves out.
    pub async fn update(&self, title: &str, patch: BookPatch) -> DomainResult<Book> {
        patch.validate()?;

        let existing = self
            .find_by_title(title)
            .await?
            .ok_or(DomainError::NotFound)?;
        let updated = patch.apply(existing.clone().into_book());
        let doc = BookDocument::from_book(&updated);

        match self.store.replace(&existing, doc).await {
            Ok(stored) => Ok(stored.into_book()),
            // Lost a race with a concurrent delete.
            Err(StoreError::NotFound(_)) => Err(DomainError::NotFound),
            Err(e) => Err(DomainError::store(e.to_string())),
        }
    }

    /// Remove the book with this title.
    pub async fn delete(&self, title: &str) -> DomainResult<()> {
        let existing = self
            .find_by_title(title)
            .await?
            .ok_or(DomainError::NotFound)?;

        match self.store.delete(&existing.id, &existing.category).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(DomainError::NotFound),
            Err(e) => Err(DomainError::store(e.to_string())),
        }
    }

    /// Resolve the stored document for a title (`id == title`).
    ///
    /// Update and delete go through here because point operations against the
    /// store need the partition key value, which only the stored document
    /// knows. This is the single home of the lookup-then-mutate race.
    async fn find_by_title(&self, title: &str) -> DomainResult<Option<BookDocument>> {
        let mut docs = self
            .store
            .query_by_key("id", title)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;

        if docs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(docs.swap_remove(0)))
        }
    }
}
