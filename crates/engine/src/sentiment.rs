//! Sentiment aggregation over a list of movies.
//!
//! Every movie lands in exactly one bucket:
//! - very positive: `score >= 0.8`
//! - positive: `0.6 <= score < 0.8`
//! - mixed: `score < 0.6`
//!
//! Bucket percentages are rounded independently, so they can add up to 99
//! or 101. Counts always add up to the total.

use crate::error::{EngineError, Result};
use catalog::Movie;
use serde::Serialize;
use std::fmt;

const VERY_POSITIVE_THRESHOLD: f32 = 0.8;
const POSITIVE_THRESHOLD: f32 = 0.6;

/// Which bucket a sentiment score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentBucket {
    VeryPositive,
    Positive,
    Mixed,
}

impl SentimentBucket {
    pub fn classify(score: f32) -> Self {
        if score >= VERY_POSITIVE_THRESHOLD {
            SentimentBucket::VeryPositive
        } else if score >= POSITIVE_THRESHOLD {
            SentimentBucket::Positive
        } else {
            SentimentBucket::Mixed
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentBucket::VeryPositive => "Very Positive",
            SentimentBucket::Positive => "Positive",
            SentimentBucket::Mixed => "Mixed",
        };
        f.write_str(label)
    }
}

/// Count and share of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketStat {
    pub count: usize,
    /// `round(100 * count / total)`
    pub percentage: u32,
}

impl BucketStat {
    fn new(count: usize, total: usize) -> Self {
        let percentage = (100.0 * count as f32 / total as f32).round() as u32;
        Self { count, percentage }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub very_positive: BucketStat,
    pub positive: BucketStat,
    pub mixed: BucketStat,
    /// Unweighted mean of every sentiment score
    pub average_score: f32,
}

impl SentimentSummary {
    pub fn bucket(&self, bucket: SentimentBucket) -> BucketStat {
        match bucket {
            SentimentBucket::VeryPositive => self.very_positive,
            SentimentBucket::Positive => self.positive,
            SentimentBucket::Mixed => self.mixed,
        }
    }

    pub fn overall(&self) -> OverallSentiment {
        OverallSentiment::from_average(self.average_score)
    }
}

/// Headline verdict for an average sentiment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallSentiment {
    Excellent,
    VeryGood,
    Good,
    Mixed,
}

impl OverallSentiment {
    pub fn from_average(average: f32) -> Self {
        if average >= 0.8 {
            OverallSentiment::Excellent
        } else if average >= 0.7 {
            OverallSentiment::VeryGood
        } else if average >= 0.6 {
            OverallSentiment::Good
        } else {
            OverallSentiment::Mixed
        }
    }
}

impl fmt::Display for OverallSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OverallSentiment::Excellent => "Excellent",
            OverallSentiment::VeryGood => "Very Good",
            OverallSentiment::Good => "Good",
            OverallSentiment::Mixed => "Mixed",
        };
        f.write_str(label)
    }
}

/// Aggregate sentiment for `movies`. Fails on an empty list.
pub fn sentiment_summary(movies: &[&Movie]) -> Result<SentimentSummary> {
    let total = movies.len();
    if total == 0 {
        return Err(EngineError::EmptyMovieList {
            operation: "sentiment summary",
        });
    }

    let (mut very_positive, mut positive, mut mixed) = (0, 0, 0);
    for movie in movies {
        match SentimentBucket::classify(movie.sentiment_score) {
            SentimentBucket::VeryPositive => very_positive += 1,
            SentimentBucket::Positive => positive += 1,
            SentimentBucket::Mixed => mixed += 1,
        }
    }

    let sum: f32 = movies.iter().map(|m| m.sentiment_score).sum();

    Ok(SentimentSummary {
        total,
        very_positive: BucketStat::new(very_positive, total),
        positive: BucketStat::new(positive, total),
        mixed: BucketStat::new(mixed, total),
        average_score: sum / total as f32,
    })
}

/// Headline numbers shown next to the sentiment breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insights {
    pub highest_rating: f32,
    pub average_rating: f32,
    pub peak_sentiment: f32,
}

/// Highest rating, mean rating and peak sentiment. Fails on an empty list.
pub fn insights(movies: &[&Movie]) -> Result<Insights> {
    if movies.is_empty() {
        return Err(EngineError::EmptyMovieList {
            operation: "insights",
        });
    }

    let highest_rating = movies.iter().map(|m| m.rating).fold(f32::MIN, f32::max);
    let peak_sentiment = movies
        .iter()
        .map(|m| m.sentiment_score)
        .fold(f32::MIN, f32::max);
    let rating_sum: f32 = movies.iter().map(|m| m.rating).sum();

    Ok(Insights {
        highest_rating,
        average_rating: rating_sum / movies.len() as f32,
        peak_sentiment,
    })
}
