//! Pairwise movie similarity and similarity-based recommendations.
//!
//! ## Algorithm
//! Five sub-scores, each normalized to [0, 1], combined as a weighted
//! average over the factors that apply to the pair:
//!
//! | Factor           | Weight | Sub-score                                  |
//! |------------------|--------|--------------------------------------------|
//! | Genre overlap    | 0.40   | Jaccard over genre labels                  |
//! | Same director    | 0.25   | 1.0 on exact match                         |
//! | Actor overlap    | 0.20   | Jaccard over actor names                   |
//! | Rating closeness | 0.10   | `max(0, 1 - |Δrating| / 10)`               |
//! | Year closeness   | 0.05   | `max(0, 1 - |Δyear| / 50)`                 |
//!
//! Genre and actor overlap only apply when at least one of the two movies
//! has entries; director, rating and year always apply. The denominator is
//! therefore between 0.40 and 1.0.

use crate::types::{ScoredMovie, rank_and_truncate};
use catalog::{Catalog, Movie};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument};

pub const GENRE_WEIGHT: f32 = 0.40;
pub const DIRECTOR_WEIGHT: f32 = 0.25;
pub const ACTOR_WEIGHT: f32 = 0.20;
pub const RATING_WEIGHT: f32 = 0.10;
pub const YEAR_WEIGHT: f32 = 0.05;

/// Rating gap at which closeness reaches zero
const RATING_SPAN: f32 = 10.0;

/// Release-year gap at which closeness reaches zero
const YEAR_SPAN: f32 = 50.0;

/// Similarity between two movies, in [0, 1].
///
/// Symmetric, and `similarity(m, m) == 1.0` for any movie.
pub fn similarity(a: &Movie, b: &Movie) -> f32 {
    let mut score = 0.0;
    let mut applicable = 0.0;

    if let Some(overlap) = jaccard(&a.genres, &b.genres) {
        score += overlap * GENRE_WEIGHT;
        applicable += GENRE_WEIGHT;
    }

    if a.director == b.director {
        score += DIRECTOR_WEIGHT;
    }
    applicable += DIRECTOR_WEIGHT;

    if let Some(overlap) = jaccard(&a.actors, &b.actors) {
        score += overlap * ACTOR_WEIGHT;
        applicable += ACTOR_WEIGHT;
    }

    score += rating_closeness(a.rating, b.rating) * RATING_WEIGHT;
    applicable += RATING_WEIGHT;

    score += year_closeness(a.year, b.year) * YEAR_WEIGHT;
    applicable += YEAR_WEIGHT;

    score / applicable
}

/// Rank the catalog by similarity to `seed`.
///
/// The seed itself (matched by id) is never returned. Candidates scoring
/// below `min_similarity` are dropped; the rest are sorted descending with
/// catalog order breaking ties, and the first `count` kept.
#[instrument(skip(catalog, seed), fields(seed_id = seed.id))]
pub fn rank_similar<'a>(
    catalog: &'a Catalog,
    seed: &Movie,
    count: usize,
    min_similarity: f32,
) -> Vec<ScoredMovie<'a>> {
    // rayon's collect keeps input order, which the stable sort relies on
    let mut scored: Vec<ScoredMovie<'a>> = catalog
        .movies()
        .par_iter()
        .filter(|candidate| candidate.id != seed.id)
        .map(|candidate| ScoredMovie::new(candidate, similarity(seed, candidate)))
        .filter(|scored| scored.score >= min_similarity)
        .collect();

    debug!(
        "{} candidates at or above similarity {}",
        scored.len(),
        min_similarity
    );

    rank_and_truncate(&mut scored, count);
    scored
}

/// |A ∩ B| / |A ∪ B| over the distinct labels, `None` when both are empty
fn jaccard(a: &[String], b: &[String]) -> Option<f32> {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return None;
    }
    let intersection = a.intersection(&b).count();
    Some(intersection as f32 / union as f32)
}

fn rating_closeness(a: f32, b: f32) -> f32 {
    (1.0 - (a - b).abs() / RATING_SPAN).max(0.0)
}

fn year_closeness(a: u16, b: u16) -> f32 {
    let gap = (i32::from(a) - i32::from(b)).abs() as f32;
    (1.0 - gap / YEAR_SPAN).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = GENRE_WEIGHT + DIRECTOR_WEIGHT + ACTOR_WEIGHT + RATING_WEIGHT + YEAR_WEIGHT;
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let catalog = Catalog::reference().unwrap();
        for m in catalog.movies() {
            assert_eq!(similarity(m, m), 1.0, "self-similarity of {}", m.title);
        }
    }

    #[test]
    fn test_self_similarity_without_genres_or_actors() {
        let mut m = movie(1);
        m.genres.clear();
        m.actors.clear();
        assert_eq!(similarity(&m, &m), 1.0);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let catalog = Catalog::reference().unwrap();
        for a in catalog.movies() {
            for b in catalog.movies() {
                let ab = similarity(a, b);
                assert_eq!(ab, similarity(b, a));
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&labels(&["A", "B"]), &labels(&["B", "C"])), Some(1.0 / 3.0));
        assert_eq!(jaccard(&labels(&["A"]), &labels(&[])), Some(0.0));
        assert_eq!(jaccard(&[], &[]), None);
        // duplicates count once
        assert_eq!(jaccard(&labels(&["A", "A"]), &labels(&["A"])), Some(1.0));
    }

    #[test]
    fn test_closeness_clamps_at_zero() {
        assert_eq!(rating_closeness(9.0, 9.0), 1.0);
        assert!((rating_closeness(9.0, 4.0) - 0.5).abs() < 1e-6);
        assert_eq!(rating_closeness(0.0, 10.0), 0.0);

        assert!((year_closeness(2000, 1975) - 0.5).abs() < 1e-6);
        assert_eq!(year_closeness(1920, 2020), 0.0);
    }

    #[test]
    fn test_empty_lists_on_both_sides_renormalize() {
        // Same director, same rating, same year, nothing to compare on
        // genres or actors: every applicable factor is perfect
        let mut a = movie(1);
        a.genres.clear();
        a.actors.clear();
        let mut b = a.clone();
        b.id = 2;

        assert_eq!(similarity(&a, &b), 1.0);

        // Different director: 0.15 out of the 0.40 that applies
        b.director = "Someone Else".to_string();
        assert!((similarity(&a, &b) - 0.15 / 0.40).abs() < 1e-6);
    }

    #[test]
    fn test_one_sided_genres_still_count() {
        let mut a = movie(1);
        a.actors.clear();
        let mut b = a.clone();
        b.id = 2;
        b.genres.clear();

        // genre factor applies with overlap 0: (0.25 + 0.10 + 0.05) / 0.80
        assert!((similarity(&a, &b) - 0.40 / 0.80).abs() < 1e-6);
    }

    #[test]
    fn test_nolan_pair() {
        let catalog = Catalog::reference().unwrap();
        let dark_knight = catalog.get_movie(3).unwrap();
        let inception = catalog.get_movie(5).unwrap();

        // genres 1/5, same director, no shared actors,
        // rating gap 0.2, year gap 2
        let expected = 0.4 * 0.2 + 0.25 + 0.0 + 0.1 * 0.98 + 0.05 * 0.96;
        assert!((similarity(dark_knight, inception) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_rank_similar_excludes_seed() {
        let catalog = Catalog::reference().unwrap();
        let seed = catalog.get_movie(5).unwrap();

        let ranked = rank_similar(&catalog, seed, 6, 0.1);

        assert_eq!(ranked.len(), 6);
        assert!(ranked.iter().all(|s| s.movie.id != seed.id));
        let top: Vec<u32> = ranked.iter().take(3).map(|s| s.movie.id).collect();
        assert_eq!(top, vec![3, 9, 7]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_similar_threshold() {
        let catalog = Catalog::reference().unwrap();
        let seed = catalog.get_movie(7).unwrap();

        // only Inception clears 0.4 for The Matrix
        let ranked = rank_similar(&catalog, seed, 6, 0.4);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].movie.title, "Inception");

        assert!(rank_similar(&catalog, seed, 6, 1.01).is_empty());
    }

    #[test]
    fn test_rank_similar_seed_outside_catalog() {
        let catalog = Catalog::reference().unwrap();
        let mut outsider = catalog.get_movie(1).unwrap().clone();
        outsider.id = 999;

        // the identical copy outranks everything, the original is not excluded
        let ranked = rank_similar(&catalog, &outsider, 3, 0.1);
        assert_eq!(ranked[0].movie.id, 1);
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let a = movie(1);
        let (mut b, mut c) = (movie(2), movie(3));
        b.title = "Twin B".to_string();
        c.title = "Twin C".to_string();
        let catalog = Catalog::from_movies(vec![c.clone(), b.clone(), a.clone()]).unwrap();

        let ranked = rank_similar(&catalog, &a, 6, 0.0);
        let ids: Vec<u32> = ranked.iter().map(|s| s.movie.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
