//! Filter implementations for preference-based ranking.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod director;
pub mod genre;
pub mod minimum_rating;
pub mod year_range;

// Re-export for convenience
pub use director::DirectorFilter;
pub use genre::GenreFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use year_range::{MaximumYearFilter, MinimumYearFilter};
