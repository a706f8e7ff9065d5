//! `bookdir-core` — domain foundation for the book directory.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod book;
pub mod error;

pub use book::{require_non_empty, Book, BookPatch};
pub use error::{DomainError, DomainResult};
