//! The book record and its update patch.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A catalogued book, as returned to clients.
///
/// `id` always equals `title`: the title is the unique, user-facing
/// identifier, and there is no separate surrogate key. `category` doubles as
/// the partition key of the backing container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
}

impl Book {
    /// Build a new book from user input.
    ///
    /// All three fields must be non-empty; `id` is set equal to `title`.
    pub fn new(title: String, author: String, category: String) -> DomainResult<Self> {
        require_non_empty("title", &title)?;
        require_non_empty("author", &author)?;
        require_non_empty("category", &category)?;

        Ok(Self {
            id: title.clone(),
            title,
            author,
            category,
        })
    }
}

/// Partial update to an existing book.
///
/// Absent fields retain the prior record's values; present fields must be
/// non-empty. `id` and `title` are never patched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub author: Option<String>,
    pub category: Option<String>,
}

impl BookPatch {
    /// Reject empty values before any store round trip happens.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(author) = self.author.as_deref() {
            require_non_empty("author", author)?;
        }
        if let Some(category) = self.category.as_deref() {
            require_non_empty("category", category)?;
        }
        Ok(())
    }

    /// Apply the patch onto an existing book, keeping `id`/`title` fixed.
    pub fn apply(self, existing: Book) -> Book {
        Book {
            author: self.author.unwrap_or(existing.author),
            category: self.category.unwrap_or(existing.category),
            ..existing
        }
    }
}

/// Boundary validation shared by create and update paths.
pub fn require_non_empty(field: &'static str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::validation(format!(
            "{field} must be a non-empty string"
        )));
    }
    Ok(())
}
