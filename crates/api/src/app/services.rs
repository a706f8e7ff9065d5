use std::sync::Arc;

use bookdir_store::{
    BookDirectory, CosmosDocumentStore, DocumentStore, InMemoryDocumentStore, StoreConfig,
};

/// Long-lived handles shared by every request handler.
///
/// Read-only after construction; safe for concurrent use across requests.
pub struct AppServices {
    pub directory: BookDirectory,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            directory: BookDirectory::new(store),
        }
    }

    /// In-memory wiring (tests/dev).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new()))
    }
}

/// Select the store backend from the environment.
///
/// `USE_COSMOS_STORE=true` picks the managed store (and requires the
/// `COSMOS_*` settings); anything else falls back to the in-memory store.
pub fn build_services() -> anyhow::Result<AppServices> {
    let use_cosmos = std::env::var("USE_COSMOS_STORE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_cosmos {
        let config = StoreConfig::from_env()?;
        let store = CosmosDocumentStore::new(&config)?;
        tracing::info!(
            endpoint = %config.endpoint,
            database = %config.database,
            container = %config.container,
            "using cosmos document store"
        );
        return Ok(AppServices::new(Arc::new(store)));
    }

    tracing::warn!("USE_COSMOS_STORE not set; using in-memory document store");
    Ok(AppServices::in_memory())
}
