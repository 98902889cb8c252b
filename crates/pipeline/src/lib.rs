//! Pipeline for filtering swipe pools before presentation.
//!
//! This crate provides:
//! - Filter trait and implementations for pool filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! A pool goes through the pipeline once per load:
//! 1. Items the actor already accepted or rejected are removed (catalog and
//!    fallback pools only; ranked pools arrive pre-filtered)
//! 2. Repeated ids are collapsed to their first occurrence
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use sources::build_decision_context;
//!
//! let context = build_decision_context(&journal, "u1", Category::Job);
//! let pool = FilterPipeline::local_pool().apply(items, &context)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
