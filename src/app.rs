// app.rs
use crate::catalog::{CatalogLoader, CatalogSource, LoadError};
use crate::config::Config;
use crate::domain::Catalog;
use crate::view::{SessionStore, ViewController};
use std::sync::Arc;

/// Everything the request handler needs, shared across server workers.
pub struct App {
    pub config: Config,
    catalog: Arc<Catalog>,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let sessions = SessionStore::new(config.session_idle, config.max_sessions);
        Self {
            config,
            catalog: Arc::new(catalog),
            sessions,
        }
    }

    /// Build the loader and attempt the one startup fetch. A failed fetch is
    /// logged and the app starts with an empty catalog.
    pub fn bootstrap(config: Config) -> Result<Self, LoadError> {
        let loader = CatalogLoader::new(config.fetch_timeout)?;
        let source = CatalogSource::parse(&config.listings_source);

        let catalog = match loader.load(&source) {
            Ok(catalog) => {
                if catalog.is_empty() {
                    tracing::warn!(source = %source, "catalog has no categories");
                }
                catalog
            }
            Err(e) => {
                tracing::error!(source = %source, error = %e, "catalog load failed; starting empty");
                Catalog::new()
            }
        };

        Ok(Self::new(config, catalog))
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Fresh view on the default category.
    pub fn new_view(&self) -> ViewController {
        ViewController::new(self.catalog(), &self.config.default_category)
    }
}
