//! # Journal Crate
//!
//! Durable per-actor record of swipe decisions.
//!
//! The journal talks to storage only through the [`KeyValueStore`] port, so
//! tests bind it to [`MemoryStore`] and the CLI binds it to a [`FileStore`].
//!
//! ```ignore
//! use journal::{DecisionJournal, MemoryStore};
//! use std::sync::Arc;
//!
//! let journal = DecisionJournal::new(Arc::new(MemoryStore::new()));
//! journal.record("u1", "3", Category::Job, Outcome::Accept)?;
//! assert!(journal.has_decision("u1", "3", Category::Job));
//! ```

pub mod error;
pub mod journal;
pub mod store;

pub use error::{JournalError, StoreError};
pub use journal::{DecisionJournal, DEFAULT_JOURNAL_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
