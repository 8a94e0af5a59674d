//! Filters bounding the release year.
//!
//! The lower and upper bound are separate filters so that either can be
//! used alone; both bounds are inclusive.

use crate::traits::Filter;
use catalog::Movie;

/// Keeps movies released in or after `min_year`
pub struct MinimumYearFilter {
    min_year: u16,
}

impl MinimumYearFilter {
    pub fn new(min_year: u16) -> Self {
        Self { min_year }
    }
}

impl Filter for MinimumYearFilter {
    fn name(&self) -> &str {
        "MinimumYearFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.year >= self.min_year)
            .collect()
    }
}

/// Keeps movies released in or before `max_year`
pub struct MaximumYearFilter {
    max_year: u16,
}

impl MaximumYearFilter {
    pub fn new(max_year: u16) -> Self {
        Self { max_year }
    }
}

impl Filter for MaximumYearFilter {
    fn name(&self) -> &str {
        "MaximumYearFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.year <= self.max_year)
            .collect()
    }
}
