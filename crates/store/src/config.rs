//! Connection settings for the backing container.

use anyhow::Context;

/// Where the managed document store lives.
///
/// The database, container, and its `/category` partition key path are
/// assumed to be provisioned ahead of time; nothing in this service creates
/// or migrates them.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Account endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    pub endpoint: String,
    /// Base64-encoded master key.
    pub key: String,
    pub database: String,
    pub container: String,
}

impl StoreConfig {
    /// Read settings from the environment.
    ///
    /// `COSMOS_ENDPOINT` and `COSMOS_KEY` are required; database and
    /// container names default to `BookDirectory` / `Books`.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: std::env::var("COSMOS_ENDPOINT").context("COSMOS_ENDPOINT must be set")?,
            key: std::env::var("COSMOS_KEY").context("COSMOS_KEY must be set")?,
            database: std::env::var("COSMOS_DATABASE")
                .unwrap_or_else(|_| "BookDirectory".to_string()),
            container: std::env::var("COSMOS_CONTAINER").unwrap_or_else(|_| "Books".to_string()),
        })
    }
}
