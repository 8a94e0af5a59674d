//! Core domain types for the movie catalog.
//!
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (MovieId)
//! - Structs with public fields and serde derives
//! - Owned data in the catalog, borrowed views (`&Movie`) handed out to callers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie within a catalog
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A single catalog entry.
///
/// Movies are immutable once loaded: the catalog owns them and every query
/// returns references in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Release year
    pub year: u16,
    /// Genre labels in display order, e.g. `["Action", "Sci-Fi"]`
    ///
    /// Labels are free text rather than an enum so that catalogs can carry
    /// genres such as "Biography" without a code change.
    pub genres: Vec<String>,
    pub director: String,
    pub actors: Vec<String>,
    pub plot: String,
    pub poster_url: String,
    /// Critic rating on a 0-10 scale
    pub rating: f32,
    /// Aggregated review sentiment. Documented as -1..1, every threshold
    /// the engine applies lives in 0..1.
    pub sentiment_score: f32,
    /// Number of reviews behind `sentiment_score`, always > 0 in a loaded catalog
    pub review_count: u32,
    pub runtime_minutes: u16,
}

impl Movie {
    /// True if any genre label contains `needle_lower` (already lowercased)
    pub fn has_genre_containing(&self, needle_lower: &str) -> bool {
        self.genres
            .iter()
            .any(|g| g.to_lowercase().contains(needle_lower))
    }

    /// Free-text match over title, director, actors and genres.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.director.to_lowercase().contains(query_lower)
            || self
                .actors
                .iter()
                .any(|a| a.to_lowercase().contains(query_lower))
            || self.has_genre_containing(query_lower)
    }
}

// =============================================================================
// Catalog - the read-only in-memory collection
// =============================================================================

/// The fixed, read-only collection of movies available to the engine.
///
/// Construct it once (see `Catalog::reference`, `Catalog::load_from_file`,
/// `Catalog::from_movies`) and share it behind an `Arc`. Nothing mutates a
/// catalog after construction, so concurrent readers need no locking.
#[derive(Debug)]
pub struct Catalog {
    /// Movies in fixture order; every ordered query preserves this order
    pub(crate) movies: Vec<Movie>,

    /// Position of each movie in `movies`
    pub(crate) id_index: HashMap<MovieId, usize>,

    /// Exact genre label -> movie ids, in catalog order
    pub(crate) genre_index: BTreeMap<String, Vec<MovieId>>,
}

impl Catalog {
    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.id_index.get(&id).map(|&pos| &self.movies[pos])
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Ids of the movies carrying exactly this genre label
    pub fn get_movies_by_genre(&self, label: &str) -> &[MovieId] {
        self.genre_index
            .get(label)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every distinct genre label with the number of movies carrying it,
    /// sorted by label
    pub fn genres(&self) -> Vec<(&str, usize)> {
        self.genre_index
            .iter()
            .map(|(label, ids)| (label.as_str(), ids.len()))
            .collect()
    }
}
