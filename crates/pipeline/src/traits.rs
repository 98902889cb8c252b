//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable filters to
//! be applied to a pool before it is presented.

use anyhow::Result;
use catalog::PoolItem;
use sources::DecisionContext;

/// Core trait for filtering a pool.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by concurrent sessions
/// - Filters take ownership of the pool and return a filtered pool, keeping
///   the relative order of the items they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a pool.
    ///
    /// # Arguments
    /// * `items` - The pool to filter (takes ownership)
    /// * `context` - What the actor has already decided
    fn apply(&self, items: Vec<PoolItem>, context: &DecisionContext) -> Result<Vec<PoolItem>>;
}
