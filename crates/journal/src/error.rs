//! Error types for the journal crate.

use thiserror::Error;

/// Failures of the key-value persistence port
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store key '{0}'")]
    InvalidKey(String),
}

/// Errors surfaced by journal writes.
///
/// Reads never fail: an unreadable or corrupt journal reads as empty.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Journal store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to encode journal: {0}")]
    Encode(#[from] serde_json::Error),
}
