//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading a catalog or parsing domain values.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog file is not valid JSON or does not match the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A textual value could not be mapped onto a domain enum
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two items of the same category share an id
    #[error("Duplicate {category} id: {id}")]
    DuplicateId { category: String, id: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
