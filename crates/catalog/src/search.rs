//! Free-text lookups over the catalog.
//!
//! Both lookups are case-insensitive substring matches and return borrowed
//! movies in catalog order.

use crate::types::{Catalog, Movie};

/// Autocomplete only kicks in after this many characters
const SUGGEST_MIN_QUERY_LEN: usize = 2;

/// Autocomplete list length
pub const MAX_SUGGESTIONS: usize = 8;

impl Catalog {
    /// Movies with at least one genre label containing `genre`.
    ///
    /// An empty `genre` matches every movie that has any genre at all.
    pub fn find_by_genre(&self, genre: &str) -> Vec<&Movie> {
        let needle = genre.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.has_genre_containing(&needle))
            .collect()
    }

    /// Movies whose title, director, any actor or any genre contains `query`.
    ///
    /// The query is used as given; an empty string matches everything.
    /// Callers that want "blank means no results" check for that themselves.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.matches_query(&needle))
            .collect()
    }

    /// Search-as-you-type suggestions: the first `MAX_SUGGESTIONS` search
    /// hits, or nothing while the query is a single character.
    pub fn suggest(&self, query: &str) -> Vec<&Movie> {
        if query.chars().count() < SUGGEST_MIN_QUERY_LEN {
            return Vec::new();
        }
        let mut hits = self.search(query);
        hits.truncate(MAX_SUGGESTIONS);
        hits
    }
}
