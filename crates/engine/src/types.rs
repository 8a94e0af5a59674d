//! Result types shared by the ranking operations.

use catalog::Movie;
use serde::Serialize;
use std::cmp::Ordering;

/// Default number of results for every ranking operation
pub const DEFAULT_COUNT: usize = 6;

/// Default similarity floor for `recommend`
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

/// A catalog movie paired with the score it was ranked by.
///
/// What the score means depends on the producer: similarity to a seed,
/// preference composite, or trending composite.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredMovie<'a> {
    pub movie: &'a Movie,
    pub score: f32,
}

impl<'a> ScoredMovie<'a> {
    pub fn new(movie: &'a Movie, score: f32) -> Self {
        Self { movie, score }
    }
}

/// Sort descending by score, keep the first `count`.
///
/// `sort_by` is stable, so equal scores keep their catalog order.
pub(crate) fn rank_and_truncate(scored: &mut Vec<ScoredMovie<'_>>, count: usize) {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(count);
}

/// Drop the scores, keep the ranked movies
pub fn movies_only<'a>(scored: Vec<ScoredMovie<'a>>) -> Vec<&'a Movie> {
    scored.into_iter().map(|s| s.movie).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_rank_is_stable_on_ties() {
        let (a, b, c, d) = (movie(1), movie(2), movie(3), movie(4));
        let mut scored = vec![
            ScoredMovie::new(&a, 0.5),
            ScoredMovie::new(&b, 0.9),
            ScoredMovie::new(&c, 0.5),
            ScoredMovie::new(&d, 0.5),
        ];

        rank_and_truncate(&mut scored, 3);

        let ids: Vec<u32> = scored.iter().map(|s| s.movie.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_truncate_larger_than_input() {
        let a = movie(1);
        let mut scored = vec![ScoredMovie::new(&a, 0.1)];
        rank_and_truncate(&mut scored, 10);
        assert_eq!(scored.len(), 1);
    }

    #[test]
    fn test_movies_only_keeps_order() {
        let (a, b) = (movie(1), movie(2));
        let ranked = movies_only(vec![ScoredMovie::new(&b, 0.9), ScoredMovie::new(&a, 0.1)]);
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[1].id, 1);
    }
}
