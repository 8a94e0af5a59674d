//! # Engine Crate
//!
//! Scoring and ranking over a read-only movie catalog.
//!
//! ## Components
//!
//! ### Similarity
//! Weighted average of genre overlap, director match, actor overlap,
//! rating closeness and year closeness. Drives "more like this".
//!
//! ### Preferences
//! A `PreferenceFilter` becomes a `FilterPipeline` of composable `Filter`s;
//! survivors are ranked by a rating-heavy composite.
//!
//! ### Trending
//! Rating, scaled sentiment and log review volume.
//!
//! ### Sentiment
//! Bucket counts and percentages, mean score, overall verdict, insights.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use engine::{PreferenceFilter, RecommendationEngine};
//! use std::sync::Arc;
//!
//! let engine = RecommendationEngine::new(Arc::new(Catalog::reference()?));
//!
//! let seed = engine.get_movie(5).unwrap();
//! let similar = engine.recommend(seed, 6, 0.1);
//! let classics = engine.recommend_by_preferences(
//!     &PreferenceFilter::new().with_max_year(1995),
//!     6,
//! );
//! let trending = engine.trending(8)?;
//! let summary = engine.sentiment_summary(&trending)?;
//! ```

pub mod engine;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod preferences;
pub mod sentiment;
pub mod similarity;
pub mod traits;
pub mod trending;
pub mod types;

// Re-export commonly used types
pub use engine::RecommendationEngine;
pub use error::{EngineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use preferences::{PreferenceFilter, preference_score};
pub use sentiment::{
    BucketStat, Insights, OverallSentiment, SentimentBucket, SentimentSummary,
};
pub use similarity::similarity;
pub use traits::Filter;
pub use trending::trending_score;
pub use types::{DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY, ScoredMovie};
