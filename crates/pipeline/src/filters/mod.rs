//! Filter implementations for the pool pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod already_decided;
pub mod duplicate_id;

// Re-export for convenience
pub use already_decided::AlreadyDecidedFilter;
pub use duplicate_id::DuplicateIdFilter;
