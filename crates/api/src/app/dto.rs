use serde::Deserialize;

use bookdir_core::{Book, BookPatch};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub category: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateBookRequest {
    pub author: Option<String>,
    pub category: Option<String>,
}

impl UpdateBookRequest {
    pub fn into_patch(self) -> BookPatch {
        BookPatch {
            author: self.author,
            category: self.category,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn book_to_json(book: Book) -> serde_json::Value {
    serde_json::json!({
        "id": book.id,
        "title": book.title,
        "author": book.author,
        "category": book.category,
    })
}
