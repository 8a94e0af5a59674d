//! Error types for the recommendation engine.
//!
//! Only two operations can fail: aggregating sentiment over nothing, and
//! scoring a movie whose review count has no logarithm. Everything else in
//! the engine is total and reports "nothing found" as an empty list.

use catalog::MovieId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An aggregate was requested over an empty movie list
    #[error("{operation} requires at least one movie")]
    EmptyMovieList { operation: &'static str },

    /// Trending score needs `ln(review_count)`, undefined at zero
    #[error("Movie {movie_id} has review count {review_count}; trending needs at least one review")]
    InvalidReviewCount { movie_id: MovieId, review_count: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
