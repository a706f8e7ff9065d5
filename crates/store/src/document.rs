//! The stored shape of a book.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use bookdir_core::Book;

/// A book document as the store holds it.
///
/// Carries the four book fields plus whatever bookkeeping fields the store
/// attaches on write (`_rid`, `_self`, `_etag`, `_attachments`, `_ts`).
/// Bookkeeping fields never leave this crate: converting back to a [`Book`]
/// drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,

    /// Store-internal bookkeeping, opaque to the directory.
    #[serde(flatten)]
    pub system: Map<String, Value>,
}

impl BookDocument {
    /// The document to write for a book (no bookkeeping fields yet).
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            system: Map::new(),
        }
    }

    /// The clean client-facing view, bookkeeping stripped.
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            category: self.category,
        }
    }

    /// Field lookup by name, covering bookkeeping fields too.
    pub(crate) fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(&self.id),
            "title" => Some(&self.title),
            "author" => Some(&self.author),
            "category" => Some(&self.category),
            _ => self.system.get(key).and_then(Value::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_book_strips_bookkeeping_fields() {
        let doc: BookDocument = serde_json::from_value(json!({
            "id": "Dune",
            "title": "Dune",
            "author": "Herbert",
            "category": "scifi",
            "_rid": "abc==",
            "_etag": "\"0000\"",
            "_ts": 1700000000,
        }))
        .unwrap();

        assert_eq!(doc.field("_rid"), Some("abc=="));

        let book = doc.into_book();
        let value = serde_json::to_value(&book).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["id", "title", "author", "category"] {
            assert!(object.contains_key(key));
        }
    }
}
