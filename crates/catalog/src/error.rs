//! Error types for the catalog crate.
//!
//! Every constructor validates the movie records it is handed, so a
//! `Catalog` value that exists is always internally consistent. The
//! variants below describe the ways loading can be refused.

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while loading or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The catalog document is not a valid JSON array of movies
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Two records share the same identifier
    #[error("Duplicate movie id: {id}")]
    DuplicateId { id: MovieId },

    /// A field holds a value the engine cannot score
    ///
    /// Covers non-finite numbers, a zero review count (its logarithm feeds
    /// the trending score) and a zero runtime.
    #[error("Invalid value for {field} on movie {movie_id}: {value}")]
    InvalidValue {
        movie_id: MovieId,
        field: String,
        value: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
