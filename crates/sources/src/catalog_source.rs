//! Catalog Source - the static pool
//!
//! Serves the full catalog for a category in catalog order. Filtering out
//! decided items is the pipeline's job, not the source's.

use catalog::{Catalog, Category, ItemId, PoolItem};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Pool source backed by a static catalog
#[derive(Clone)]
pub struct CatalogSource {
    /// Shared, read-only catalog
    catalog: Arc<Catalog>,
}

impl CatalogSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Every catalog item of this category
    #[instrument(skip(self))]
    pub fn get_pool(&self, category: Category) -> Vec<PoolItem> {
        let pool = self.catalog.items(category);
        debug!("Catalog pool for {}: {} items", category, pool.len());
        pool
    }

    /// Catalog items for the given ids, in the order of `ids`; unknown ids
    /// are skipped.
    pub fn lookup(&self, category: Category, ids: &[ItemId]) -> Vec<PoolItem> {
        ids.iter()
            .filter_map(|id| self.catalog.get(category, id))
            .collect()
    }
}
