//! Core traits for preference filtering.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a list of catalog movies.

use catalog::Movie;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a pipeline to be shared across threads
/// - Filters take ownership of the `Vec` and return a filtered one, keeping
///   the relative order of the movies they keep
/// - Filtering is total: a filter can only remove movies, never fail
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of movies.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie>;
}
