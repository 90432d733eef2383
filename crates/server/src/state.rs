//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dummyjson::{DummyJsonClient, DummyJsonError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the catalog API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: DummyJsonClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, DummyJsonError> {
        let catalog = DummyJsonClient::new(&config.dummyjson_base_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &DummyJsonClient {
        &self.inner.catalog
    }
}
