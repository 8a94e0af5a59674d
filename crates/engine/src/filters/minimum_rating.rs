//! Filter to enforce a minimum critic rating.

use crate::traits::Filter;
use catalog::Movie;

/// Removes movies rated below the threshold (the threshold itself passes).
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| movie.rating >= self.min_rating)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Catalog;

    #[test]
    fn test_minimum_rating_is_inclusive() {
        let catalog = Catalog::reference().unwrap();
        let movies: Vec<&Movie> = catalog.movies().iter().collect();

        let kept = MinimumRatingFilter::new(8.8).apply(movies);

        // 9.3, 9.2, 9.0, 8.9, 8.8 (Inception), 8.8 (Forrest Gump)
        let ids: Vec<u32> = kept.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
