//! Process-wide holder for the station catalog.
//!
//! Readers take an `Arc` snapshot; a rebuild replaces the snapshot in one
//! write, so a reader either sees the previous complete catalog or the new
//! complete catalog, never an in-progress build.

use crate::stations::catalog::StationCatalog;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct CatalogCache {
    inner: RwLock<Option<Arc<StationCatalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current catalog snapshot, or `None` if no catalog has been
    /// installed yet.
    pub async fn snapshot(&self) -> Option<Arc<StationCatalog>> {
        self.inner.read().await.clone()
    }

    /// Installs a freshly built catalog, replacing the previous snapshot
    /// wholesale. Readers holding the old `Arc` keep a consistent view.
    pub async fn replace(&self, catalog: StationCatalog) {
        *self.inner.write().await = Some(Arc::new(catalog));
    }
}
