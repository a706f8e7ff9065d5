//! Document-store capability and its implementations.

pub mod cosmos;
pub mod in_memory;
pub mod r#trait;

pub use cosmos::CosmosDocumentStore;
pub use in_memory::InMemoryDocumentStore;
pub use r#trait::{DocumentStore, StoreError};
