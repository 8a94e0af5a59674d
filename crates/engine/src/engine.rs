//! # Recommendation Engine
//!
//! Facade over the catalog and the scoring modules. It owns a shared,
//! read-only catalog and exposes the seven operations consumers need:
//! `similarity`, `recommend`, `recommend_by_preferences`, `trending`,
//! `sentiment_summary`, `search` and `find_by_genre`.
//!
//! Every method is a pure read; clone the engine (or share it through an
//! `Arc`) freely across threads.

use std::sync::Arc;

use catalog::{Catalog, Movie, MovieId};

use crate::error::Result;
use crate::preferences::{PreferenceFilter, rank_by_preferences};
use crate::sentiment::{self, Insights, SentimentSummary};
use crate::similarity::{self, rank_similar};
use crate::trending::rank_trending;
use crate::types::{ScoredMovie, movies_only};

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.catalog.get_movie(id)
    }

    /// Similarity between two movies, in [0, 1]
    pub fn similarity(&self, a: &Movie, b: &Movie) -> f32 {
        similarity::similarity(a, b)
    }

    /// Up to `count` movies most similar to `seed`, each scoring at least
    /// `min_similarity`. The seed is never included.
    pub fn recommend(&self, seed: &Movie, count: usize, min_similarity: f32) -> Vec<&Movie> {
        movies_only(self.recommend_scored(seed, count, min_similarity))
    }

    /// `recommend` with the similarity of each result
    pub fn recommend_scored(
        &self,
        seed: &Movie,
        count: usize,
        min_similarity: f32,
    ) -> Vec<ScoredMovie<'_>> {
        rank_similar(&self.catalog, seed, count, min_similarity)
    }

    /// Up to `count` movies passing `filter`, best preference score first
    pub fn recommend_by_preferences(&self, filter: &PreferenceFilter, count: usize) -> Vec<&Movie> {
        movies_only(self.recommend_by_preferences_scored(filter, count))
    }

    pub fn recommend_by_preferences_scored(
        &self,
        filter: &PreferenceFilter,
        count: usize,
    ) -> Vec<ScoredMovie<'_>> {
        rank_by_preferences(&self.catalog, filter, count)
    }

    /// The `count` highest-trending movies in the catalog
    pub fn trending(&self, count: usize) -> Result<Vec<&Movie>> {
        self.trending_scored(count).map(movies_only)
    }

    pub fn trending_scored(&self, count: usize) -> Result<Vec<ScoredMovie<'_>>> {
        rank_trending(&self.catalog, count)
    }

    /// Sentiment buckets and mean score. `movies` must not be empty.
    pub fn sentiment_summary(&self, movies: &[&Movie]) -> Result<SentimentSummary> {
        sentiment::sentiment_summary(movies)
    }

    /// Rating and sentiment highlights. `movies` must not be empty.
    pub fn insights(&self, movies: &[&Movie]) -> Result<Insights> {
        sentiment::insights(movies)
    }

    pub fn search(&self, query: &str) -> Vec<&Movie> {
        self.catalog.search(query)
    }

    pub fn suggest(&self, query: &str) -> Vec<&Movie> {
        self.catalog.suggest(query)
    }

    pub fn find_by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.catalog.find_by_genre(genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY};

    fn reference_engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(Catalog::reference().unwrap()))
    }

    #[test]
    fn test_recommend_matches_scored_variant() {
        let engine = reference_engine();
        let seed = engine.get_movie(3).unwrap();

        let plain = engine.recommend(seed, DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY);
        let scored = engine.recommend_scored(seed, DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY);

        let plain_ids: Vec<u32> = plain.iter().map(|m| m.id).collect();
        let scored_ids: Vec<u32> = scored.iter().map(|s| s.movie.id).collect();
        assert_eq!(plain_ids, scored_ids);
        assert_eq!(plain_ids[0], 5);
    }

    #[test]
    fn test_similarity_delegates() {
        let engine = reference_engine();
        let a = engine.get_movie(1).unwrap();
        let b = engine.get_movie(2).unwrap();
        assert_eq!(engine.similarity(a, b), similarity::similarity(a, b));
    }

    #[test]
    fn test_engine_is_shareable() {
        let engine = reference_engine();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.trending(3).unwrap().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    }
}
