//! Parser for catalog documents.
//!
//! A catalog document is a JSON array of movie objects whose keys match the
//! `Movie` field names:
//!
//! ```json
//! [{ "id": 1, "title": "The Shawshank Redemption", "year": 1994,
//!    "genres": ["Drama"], "director": "Frank Darabont",
//!    "actors": ["Tim Robbins"], "plot": "...", "poster_url": "...",
//!    "rating": 9.3, "sentiment_score": 0.9, "review_count": 2500000,
//!    "runtime_minutes": 142 }]
//! ```
//!
//! Parsing only checks shape; value validation happens when the records are
//! turned into a `Catalog`.

use crate::error::{CatalogError, Result};
use crate::types::Movie;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// The reference ten-movie fixture, compiled into the binary
pub(crate) const REFERENCE_FIXTURE: &str = include_str!("../data/movies.json");

/// Parse a JSON catalog document
pub fn parse_movies(document: &str) -> Result<Vec<Movie>> {
    let movies: Vec<Movie> = serde_json::from_str(document)?;
    Ok(movies)
}

/// Read and parse a catalog file
pub fn read_movies_file(path: &Path) -> Result<Vec<Movie>> {
    let document = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;
    parse_movies(&document)
}
