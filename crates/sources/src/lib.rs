//! # Sources Crate
//!
//! Pool sources for the swipe session.
//!
//! ## Components
//!
//! ### Catalog Source (static)
//! The built-in or file-loaded catalog, served in catalog order. Used for
//! recruiters and as the fallback pool for job seekers.
//!
//! ### Ranking Source (remote)
//! The relevance-ranked job pool from the recommendation backend, already
//! stripped of jobs the user has swiped on.
//!
//! ### Decision Context
//! A snapshot of the decision journal for one actor and category, consumed
//! by the filter pipeline.
//!
//! ## Example Usage
//!
//! ```ignore
//! let context = build_decision_context(&journal, "u1", Category::Job);
//! let catalog = CatalogSource::new(Arc::new(Catalog::builtin()));
//! let ranking = RankingSource::new(Arc::new(backend_client));
//!
//! let pool = match ranking.fetch_ranked("17").await {
//!     Ok(pool) => pool,
//!     Err(_) => catalog.get_pool(Category::Job),
//! };
//! ```

pub mod catalog_source;
pub mod decision_context;
pub mod ranking_source;

pub use catalog_source::CatalogSource;
pub use decision_context::{build_decision_context, DecisionContext};
pub use ranking_source::{adapt_job, FetchFailure, RankingSource};
