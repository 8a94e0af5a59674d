//! Catalog construction and indexing.
//!
//! Builds a `Catalog` from parsed movies:
//! - Validate every record (fail fast, nothing half-loaded)
//! - Build the id index used by `get_movie`
//! - Build the genre index used by `get_movies_by_genre` and `genres`

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// The embedded ten-movie reference catalog
    pub fn reference() -> Result<Self> {
        let movies = parser::parse_movies(parser::REFERENCE_FIXTURE)?;
        Self::from_movies(movies)
    }

    /// Load a catalog from a JSON document on disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);
        let movies = parser::read_movies_file(path)?;
        Self::from_movies(movies)
    }

    /// Build a catalog from already-constructed movies.
    ///
    /// Catalog order is the order of `movies`. Fails on the first invalid
    /// record.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut id_index = HashMap::with_capacity(movies.len());
        for (pos, movie) in movies.iter().enumerate() {
            validate_movie(movie)?;
            if id_index.insert(movie.id, pos).is_some() {
                return Err(CatalogError::DuplicateId { id: movie.id });
            }
        }

        let mut catalog = Catalog {
            movies,
            id_index,
            genre_index: BTreeMap::new(),
        };
        catalog.build_genre_index();

        info!(
            "Catalog ready: {} movies, {} genres",
            catalog.movies.len(),
            catalog.genre_index.len()
        );
        Ok(catalog)
    }

    fn build_genre_index(&mut self) {
        for movie in &self.movies {
            for genre in &movie.genres {
                let ids = self.genre_index.entry(genre.clone()).or_default();
                // duplicate labels on one movie index it once
                if ids.last() != Some(&movie.id) {
                    ids.push(movie.id);
                }
            }
        }
        debug!("Built genre index with {} labels", self.genre_index.len());
    }
}

/// Check the invariants the scoring code depends on
fn validate_movie(movie: &Movie) -> Result<()> {
    let invalid = |field: &str, value: String| CatalogError::InvalidValue {
        movie_id: movie.id,
        field: field.to_string(),
        value,
    };

    if !movie.rating.is_finite() {
        return Err(invalid("rating", movie.rating.to_string()));
    }
    if !movie.sentiment_score.is_finite() {
        return Err(invalid("sentiment_score", movie.sentiment_score.to_string()));
    }
    if movie.review_count == 0 {
        return Err(invalid("review_count", movie.review_count.to_string()));
    }
    if movie.runtime_minutes == 0 {
        return Err(invalid("runtime_minutes", movie.runtime_minutes.to_string()));
    }
    Ok(())
}
