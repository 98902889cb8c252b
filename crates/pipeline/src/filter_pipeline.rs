//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{AlreadyDecidedFilter, DuplicateIdFilter};
use crate::traits::Filter;
use anyhow::Result;
use catalog::PoolItem;
use sources::DecisionContext;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyDecidedFilter)
///     .add_filter(DuplicateIdFilter);
///
/// let pool = pipeline.apply(items, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline for pools that must be filtered locally: drops decided
    /// items, then duplicate ids.
    pub fn local_pool() -> Self {
        Self::new()
            .add_filter(AlreadyDecidedFilter)
            .add_filter(DuplicateIdFilter)
    }

    /// Pipeline for server-filtered pools: only enforces unique ids.
    pub fn trusted_pool() -> Self {
        Self::new().add_filter(DuplicateIdFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the pool.
    ///
    /// # Returns
    /// * `Ok(Vec<PoolItem>)` - The pool after all filters
    /// * `Err` - If any filter fails
    pub fn apply(&self, items: Vec<PoolItem>, context: &DecisionContext) -> Result<Vec<PoolItem>> {
        let mut current = items;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, Category};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = DecisionContext::new("u1", Category::Job);

        let items = Catalog::builtin().items(Category::Job);
        let filtered = pipeline.apply(items, &context).unwrap();
        assert_eq!(filtered.len(), 8);
    }

    #[test]
    fn test_single_filter() {
        let mut context = DecisionContext::new("u1", Category::Job);
        context.accepted.insert("1".to_string());

        let pipeline = FilterPipeline::new().add_filter(AlreadyDecidedFilter);

        let items = Catalog::builtin().items(Category::Job);
        let filtered = pipeline.apply(items, &context).unwrap();
        assert_eq!(filtered.len(), 7);
        assert_eq!(filtered[0].id(), "2");
    }

    #[test]
    fn test_preset_pipelines() {
        assert_eq!(
            FilterPipeline::local_pool().filter_names(),
            vec!["AlreadyDecidedFilter", "DuplicateIdFilter"]
        );
        assert_eq!(
            FilterPipeline::trusted_pool().filter_names(),
            vec!["DuplicateIdFilter"]
        );
    }
}
