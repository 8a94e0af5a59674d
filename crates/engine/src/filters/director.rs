//! Filter to keep only movies by one of the requested directors.

use crate::traits::Filter;
use catalog::Movie;
use std::collections::HashSet;

/// Keeps movies whose director is in the set (exact match).
pub struct DirectorFilter {
    directors: HashSet<String>,
}

impl DirectorFilter {
    pub fn new<I, S>(directors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            directors: directors.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for DirectorFilter {
    fn name(&self) -> &str {
        "DirectorFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| self.directors.contains(&movie.director))
            .collect()
    }
}
