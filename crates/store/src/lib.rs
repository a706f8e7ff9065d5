//! Infrastructure layer: document-store clients and the directory service.

pub mod config;
pub mod directory;
pub mod document;
pub mod document_store;

pub use config::StoreConfig;
pub use directory::BookDirectory;
pub use document::BookDocument;
pub use document_store::{CosmosDocumentStore, DocumentStore, InMemoryDocumentStore, StoreError};
