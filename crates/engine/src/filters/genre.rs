//! Filter to keep only movies in one of the requested genres.

use crate::traits::Filter;
use catalog::Movie;
use std::collections::HashSet;

/// Keeps movies carrying at least one of the given genre labels.
///
/// Labels are compared exactly; this is a membership test, not the
/// substring match `Catalog::find_by_genre` performs.
pub struct GenreFilter {
    genres: HashSet<String>,
}

impl GenreFilter {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.genres.iter().any(|g| self.genres.contains(g)))
            .collect()
    }
}
