//! # Catalog Crate
//!
//! Domain types and item catalogs for the swipe matching engine.
//!
//! ## Main Components
//!
//! - **types**: Actor/item ids, categories, outcomes, decisions and profiles
//! - **index**: `Catalog`, an ordered, id-indexed store of poolable items
//! - **dataset**: Built-in mock datasets and JSON catalog files
//! - **error**: Error types for catalog loading and value parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, Category};
//!
//! let catalog = Catalog::builtin();
//! let jobs = catalog.items(Category::Job);
//! println!("{} jobs, first is {}", jobs.len(), jobs[0].headline());
//! ```

pub mod dataset;
pub mod error;
pub mod index;
pub mod types;

pub use dataset::{builtin_candidates, builtin_jobs};
pub use error::{CatalogError, Result};
pub use index::Catalog;
pub use types::{
    // Type aliases
    ActorId,
    ItemId,
    // Core types
    CandidateProfile,
    Decision,
    JobOffer,
    PoolItem,
    // Enums
    Category,
    Direction,
    Outcome,
};
