//! Trending ranking.
//!
//! Score = `0.5 * rating + 0.3 * (sentiment * 10) + 0.2 * ln(review_count)`.
//! Rating and scaled sentiment live on comparable 0-10 scales; the log keeps
//! review volume from swamping both.

use crate::error::{EngineError, Result};
use crate::types::{ScoredMovie, rank_and_truncate};
use catalog::{Catalog, Movie};
use rayon::prelude::*;
use tracing::{debug, instrument};

const RATING_WEIGHT: f32 = 0.5;
const SENTIMENT_WEIGHT: f32 = 0.3;
const SENTIMENT_SCALE: f32 = 10.0;
const REVIEW_WEIGHT: f32 = 0.2;

/// Trending composite for one movie.
///
/// Fails on a zero review count rather than ranking with `-inf`.
pub fn trending_score(movie: &Movie) -> Result<f32> {
    if movie.review_count == 0 {
        return Err(EngineError::InvalidReviewCount {
            movie_id: movie.id,
            review_count: movie.review_count,
        });
    }
    let reviews = (movie.review_count as f32).ln();
    Ok(RATING_WEIGHT * movie.rating
        + SENTIMENT_WEIGHT * (movie.sentiment_score * SENTIMENT_SCALE)
        + REVIEW_WEIGHT * reviews)
}

/// Rank the whole catalog by trending score and keep the top `count`.
#[instrument(skip(catalog))]
pub fn rank_trending(catalog: &Catalog, count: usize) -> Result<Vec<ScoredMovie<'_>>> {
    let mut scored = catalog
        .movies()
        .par_iter()
        .map(|movie| trending_score(movie).map(|score| ScoredMovie::new(movie, score)))
        .collect::<Result<Vec<_>>>()?;

    rank_and_truncate(&mut scored, count);
    debug!("Selected {} trending movies", scored.len());
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_trending_score_formula() {
        let mut m = movie(1);
        m.rating = 8.0;
        m.sentiment_score = 0.5;
        m.review_count = 1;
        // ln(1) = 0: 0.5 * 8 + 0.3 * 5
        assert!((trending_score(&m).unwrap() - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_review_count_is_an_error() {
        let mut m = movie(9);
        m.review_count = 0;
        assert_eq!(
            trending_score(&m),
            Err(EngineError::InvalidReviewCount {
                movie_id: 9,
                review_count: 0
            })
        );
    }

    #[test]
    fn test_reference_trending_order() {
        let catalog = Catalog::reference().unwrap();
        let ranked = rank_trending(&catalog, 10).unwrap();

        let ids: Vec<u32> = ranked.iter().map(|s| s.movie.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 6, 5, 4, 8, 7, 10, 9]);
    }

    #[test]
    fn test_review_volume_breaks_equal_quality() {
        let mut quiet = movie(1);
        quiet.review_count = 10;
        let mut loud = movie(2);
        loud.review_count = 10_000;
        let catalog = Catalog::from_movies(vec![quiet, loud]).unwrap();

        let ranked = rank_trending(&catalog, 1).unwrap();
        assert_eq!(ranked[0].movie.id, 2);
    }

    #[test]
    fn test_count_zero() {
        let catalog = Catalog::reference().unwrap();
        assert!(rank_trending(&catalog, 0).unwrap().is_empty());
    }
}
