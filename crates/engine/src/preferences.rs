//! Preference-based ranking.
//!
//! ## Algorithm
//! 1. Build a `FilterPipeline` from the dimensions the caller set, in a
//!    fixed order: genres, directors, minimum rating, minimum year,
//!    maximum year
//! 2. Run the whole catalog through it
//! 3. Rank survivors by `0.7 * rating + 0.3 * (sentiment * 3)`
//!
//! The sentiment term is scaled by 3 only, so it can add at most 0.9 while
//! the rating term reaches 7.0. Rating dominates the order.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    DirectorFilter, GenreFilter, MaximumYearFilter, MinimumRatingFilter, MinimumYearFilter,
};
use crate::types::{ScoredMovie, rank_and_truncate};
use catalog::{Catalog, Movie};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const RATING_WEIGHT: f32 = 0.7;
const SENTIMENT_WEIGHT: f32 = 0.3;
const SENTIMENT_SCALE: f32 = 3.0;

/// What the caller is in the mood for.
///
/// Every dimension is optional. An empty `genres` or `directors` list, or a
/// `None` bound, places no restriction on that dimension, so
/// `PreferenceFilter::default()` keeps the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceFilter {
    /// Keep movies with at least one of these genre labels
    pub genres: Vec<String>,
    /// Keep movies by one of these directors
    pub directors: Vec<String>,
    /// Inclusive lower bound on rating
    pub min_rating: Option<f32>,
    /// Inclusive lower bound on release year
    pub min_year: Option<u16>,
    /// Inclusive upper bound on release year
    pub max_year: Option<u16>,
}

impl PreferenceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_directors<I, S>(mut self, directors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directors = directors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_min_year(mut self, min_year: u16) -> Self {
        self.min_year = Some(min_year);
        self
    }

    pub fn with_max_year(mut self, max_year: u16) -> Self {
        self.max_year = Some(max_year);
        self
    }

    /// Translate the set dimensions into filters, in evaluation order
    pub fn to_pipeline(&self) -> FilterPipeline {
        let mut pipeline = FilterPipeline::new();
        if !self.genres.is_empty() {
            pipeline = pipeline.add_filter(GenreFilter::new(self.genres.iter().cloned()));
        }
        if !self.directors.is_empty() {
            pipeline = pipeline.add_filter(DirectorFilter::new(self.directors.iter().cloned()));
        }
        if let Some(min_rating) = self.min_rating {
            pipeline = pipeline.add_filter(MinimumRatingFilter::new(min_rating));
        }
        if let Some(min_year) = self.min_year {
            pipeline = pipeline.add_filter(MinimumYearFilter::new(min_year));
        }
        if let Some(max_year) = self.max_year {
            pipeline = pipeline.add_filter(MaximumYearFilter::new(max_year));
        }
        pipeline
    }
}

/// Composite used to order preference matches
pub fn preference_score(movie: &Movie) -> f32 {
    RATING_WEIGHT * movie.rating + SENTIMENT_WEIGHT * (movie.sentiment_score * SENTIMENT_SCALE)
}

/// Filter the catalog by `filter` and return the best `count` matches.
#[instrument(skip(catalog, filter))]
pub fn rank_by_preferences<'a>(
    catalog: &'a Catalog,
    filter: &PreferenceFilter,
    count: usize,
) -> Vec<ScoredMovie<'a>> {
    let pipeline = filter.to_pipeline();
    let matches = pipeline.apply(catalog.movies().iter().collect());
    debug!("{} movies match {:?}", matches.len(), filter);

    let mut scored: Vec<ScoredMovie<'a>> = matches
        .into_iter()
        .map(|movie| ScoredMovie::new(movie, preference_score(movie)))
        .collect();
    rank_and_truncate(&mut scored, count);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    fn ids(ranked: &[ScoredMovie<'_>]) -> Vec<u32> {
        ranked.iter().map(|s| s.movie.id).collect()
    }

    #[test]
    fn test_preference_score_formula() {
        let mut m = movie(1);
        m.rating = 8.0;
        m.sentiment_score = 1.0;
        // 0.7 * 8 + 0.3 * 3
        assert!((preference_score(&m) - 6.5).abs() < 1e-5);
    }

    #[test]
    fn test_default_filter_is_empty_pipeline() {
        assert!(PreferenceFilter::default().to_pipeline().filter_names().is_empty());
    }

    #[test]
    fn test_pipeline_order() {
        let filter = PreferenceFilter::new()
            .with_max_year(2000)
            .with_min_year(1990)
            .with_min_rating(8.0)
            .with_directors(["Martin Scorsese"])
            .with_genres(["Crime"]);

        assert_eq!(
            filter.to_pipeline().filter_names(),
            vec![
                "GenreFilter",
                "DirectorFilter",
                "MinimumRatingFilter",
                "MinimumYearFilter",
                "MaximumYearFilter"
            ]
        );
    }

    #[test]
    fn test_min_rating_ranking() {
        let catalog = Catalog::reference().unwrap();
        let filter = PreferenceFilter::new().with_min_rating(8.5);

        let ranked = rank_by_preferences(&catalog, &filter, 6);

        // every fixture movie is rated >= 8.5; composite order decides
        assert_eq!(ids(&ranked), vec![1, 2, 3, 6, 4, 5]);
        assert!(ranked.iter().all(|s| s.movie.rating >= 8.5));
    }

    #[test]
    fn test_sentiment_breaks_close_ratings() {
        let catalog = Catalog::reference().unwrap();
        // Inception and Forrest Gump are both 8.8; Gump has the warmer reviews
        let filter = PreferenceFilter::new().with_min_rating(8.8).with_max_year(2010);

        let ranked = rank_by_preferences(&catalog, &filter, 10);
        let gump = ranked.iter().position(|s| s.movie.id == 6).unwrap();
        let inception = ranked.iter().position(|s| s.movie.id == 5).unwrap();
        assert!(gump < inception);
    }

    #[test]
    fn test_genre_and_director() {
        let catalog = Catalog::reference().unwrap();
        let filter = PreferenceFilter::new()
            .with_genres(["Sci-Fi"])
            .with_directors(["Christopher Nolan"]);

        let ranked = rank_by_preferences(&catalog, &filter, 6);
        assert_eq!(ids(&ranked), vec![5, 9]);
    }

    #[test]
    fn test_no_matches() {
        let catalog = Catalog::reference().unwrap();
        let filter = PreferenceFilter::new().with_min_year(2020);
        assert!(rank_by_preferences(&catalog, &filter, 6).is_empty());
    }

    #[test]
    fn test_count_caps_results() {
        let catalog = Catalog::reference().unwrap();
        let ranked = rank_by_preferences(&catalog, &PreferenceFilter::default(), 3);
        assert_eq!(ids(&ranked), vec![1, 2, 3]);
    }
}
