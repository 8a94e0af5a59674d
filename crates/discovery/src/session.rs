//! # Discovery Session
//!
//! Coordinates the engine operations behind a single browsing flow:
//! 1. On start: rank trending movies and seed personalized picks with
//!    highly rated titles
//! 2. Search: run a free-text search (blank queries clear the results)
//! 3. Select a movie: find similar movies and re-rank personalized picks
//!    by the selected movie's genres
//! 4. Sentiment: aggregate whatever is currently in focus, preferring the
//!    selection, then search results, then trending
//!
//! The session stores movie ids only and resolves them against the shared
//! catalog on read, so it never holds borrows across calls.

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info};

use catalog::{Movie, MovieId};
use engine::{
    DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY, Insights, OverallSentiment, PreferenceFilter,
    RecommendationEngine, SentimentSummary,
};

/// Tunables for a discovery session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Similar movies shown for a selection
    pub similar_count: usize,
    /// Similarity floor for those movies
    pub min_similarity: f32,
    /// Trending movies shown on start
    pub trending_count: usize,
    /// Personalized picks shown at any time
    pub personalized_count: usize,
    /// Rating floor for the personalized picks shown before any selection
    pub initial_min_rating: f32,
    /// Rating floor for personalized picks derived from a selection
    pub selection_min_rating: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            similar_count: DEFAULT_COUNT,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            trending_count: 8,
            personalized_count: DEFAULT_COUNT,
            initial_min_rating: 8.5,
            selection_min_rating: 7.0,
        }
    }
}

/// Which movies currently feed the sentiment dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentSubject {
    /// The selected movie followed by its similar movies
    Selection,
    /// The latest non-empty search results
    SearchResults,
    Trending,
}

/// Everything the sentiment dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct SentimentView {
    pub title: String,
    pub subject: SentimentSubject,
    pub summary: SentimentSummary,
    pub overall: OverallSentiment,
    pub insights: Insights,
}

/// A serializable copy of every section of the session
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverySnapshot<'a> {
    pub selected: Option<&'a Movie>,
    pub search_query: &'a str,
    pub search_results: Vec<&'a Movie>,
    pub similar: Vec<&'a Movie>,
    pub personalized: Vec<&'a Movie>,
    pub trending: Vec<&'a Movie>,
    pub sentiment: Option<SentimentView>,
}

/// State of one discovery flow
#[derive(Debug, Clone)]
pub struct DiscoverySession {
    engine: RecommendationEngine,
    config: SessionConfig,
    selected: Option<MovieId>,
    search_query: String,
    search_results: Vec<MovieId>,
    similar: Vec<MovieId>,
    personalized: Vec<MovieId>,
    trending: Vec<MovieId>,
}

impl DiscoverySession {
    /// Start a session with the default configuration
    pub fn new(engine: RecommendationEngine) -> Result<Self> {
        Self::with_config(engine, SessionConfig::default())
    }

    /// Start a session: trending and initial personalized picks are ranked
    /// immediately.
    pub fn with_config(engine: RecommendationEngine, config: SessionConfig) -> Result<Self> {
        let start_time = Instant::now();

        let trending = ids(
            &engine
                .trending(config.trending_count)
                .context("Failed to rank trending movies")?,
        );

        let initial = PreferenceFilter::new().with_min_rating(config.initial_min_rating);
        let personalized = ids(&engine.recommend_by_preferences(&initial, config.personalized_count));

        info!(
            "Session started with {} trending and {} personalized movies in {:.2?}",
            trending.len(),
            personalized.len(),
            start_time.elapsed()
        );

        Ok(Self {
            engine,
            config,
            selected: None,
            search_query: String::new(),
            search_results: Vec::new(),
            similar: Vec::new(),
            personalized,
            trending,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Focus the session on one movie.
    ///
    /// Clears the search, ranks similar movies, and replaces personalized
    /// picks with well-rated movies sharing a genre with the selection
    /// (the selection itself excluded).
    pub fn select_movie(&mut self, movie_id: MovieId) -> Result<()> {
        let movie = self
            .engine
            .get_movie(movie_id)
            .ok_or_else(|| anyhow!("Movie {} not found", movie_id))?;
        info!("Selected movie {} ({})", movie.id, movie.title);

        let similar = ids(&self.engine.recommend(
            movie,
            self.config.similar_count,
            self.config.min_similarity,
        ));

        let by_genre = PreferenceFilter::new()
            .with_genres(movie.genres.iter().cloned())
            .with_min_rating(self.config.selection_min_rating);
        let personalized: Vec<MovieId> = self
            .engine
            .recommend_by_preferences(&by_genre, self.config.personalized_count)
            .into_iter()
            .filter(|m| m.id != movie_id)
            .map(|m| m.id)
            .collect();

        debug!(
            "{} similar and {} personalized movies for {}",
            similar.len(),
            personalized.len(),
            movie_id
        );

        self.selected = Some(movie_id);
        self.search_query.clear();
        self.search_results.clear();
        self.similar = similar;
        self.personalized = personalized;
        Ok(())
    }

    /// Run a search and keep its results. Returns the number of hits.
    ///
    /// A blank query clears the results instead of matching everything.
    pub fn search(&mut self, query: &str) -> usize {
        self.search_query = query.to_string();
        if query.trim().is_empty() {
            self.search_results.clear();
            return 0;
        }

        self.search_results = ids(&self.engine.search(query));
        if self.search_results.is_empty() {
            info!("No movies found for {:?}", query);
        } else {
            info!("Found {} movies matching {:?}", self.search_results.len(), query);
        }
        self.search_results.len()
    }

    /// Autocomplete for a partially typed query
    pub fn suggestions(&self, query: &str) -> Vec<&Movie> {
        self.engine.suggest(query)
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.selected.and_then(|id| self.engine.get_movie(id))
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn search_results(&self) -> Vec<&Movie> {
        self.resolve(&self.search_results)
    }

    /// Movies similar to the selection, empty before any selection
    pub fn similar(&self) -> Vec<&Movie> {
        self.resolve(&self.similar)
    }

    pub fn personalized(&self) -> Vec<&Movie> {
        self.resolve(&self.personalized)
    }

    pub fn trending(&self) -> Vec<&Movie> {
        self.resolve(&self.trending)
    }

    pub fn sentiment_subject(&self) -> SentimentSubject {
        if self.selected.is_some() {
            SentimentSubject::Selection
        } else if !self.search_results.is_empty() {
            SentimentSubject::SearchResults
        } else {
            SentimentSubject::Trending
        }
    }

    /// The movies the sentiment dashboard aggregates over
    pub fn sentiment_movies(&self) -> Vec<&Movie> {
        match self.sentiment_subject() {
            SentimentSubject::Selection => {
                let mut movies: Vec<&Movie> = self.selected().into_iter().collect();
                movies.extend(self.similar());
                movies
            }
            SentimentSubject::SearchResults => self.search_results(),
            SentimentSubject::Trending => self.trending(),
        }
    }

    pub fn sentiment_title(&self) -> String {
        match (self.sentiment_subject(), self.selected()) {
            (SentimentSubject::Selection, Some(movie)) => {
                format!("Sentiment Analysis - {} & Similar Movies", movie.title)
            }
            (SentimentSubject::SearchResults, _) => {
                format!("Sentiment Analysis - \"{}\" Results", self.search_query)
            }
            _ => "Sentiment Analysis - Trending Movies".to_string(),
        }
    }

    /// Aggregate sentiment over the movies currently in focus.
    ///
    /// Fails only if there is nothing in focus, e.g. an empty catalog.
    pub fn sentiment_view(&self) -> Result<SentimentView> {
        let movies = self.sentiment_movies();
        let summary = self
            .engine
            .sentiment_summary(&movies)
            .context("Failed to summarize sentiment")?;
        let insights = self
            .engine
            .insights(&movies)
            .context("Failed to compute insights")?;

        Ok(SentimentView {
            title: self.sentiment_title(),
            subject: self.sentiment_subject(),
            overall: summary.overall(),
            summary,
            insights,
        })
    }

    /// Every section at once; sentiment is omitted when nothing is in focus
    pub fn snapshot(&self) -> DiscoverySnapshot<'_> {
        DiscoverySnapshot {
            selected: self.selected(),
            search_query: &self.search_query,
            search_results: self.search_results(),
            similar: self.similar(),
            personalized: self.personalized(),
            trending: self.trending(),
            sentiment: self.sentiment_view().ok(),
        }
    }

    fn resolve(&self, ids: &[MovieId]) -> Vec<&Movie> {
        ids.iter().filter_map(|&id| self.engine.get_movie(id)).collect()
    }
}

fn ids(movies: &[&Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Catalog;
    use std::sync::Arc;

    fn build_session() -> DiscoverySession {
        let catalog = Arc::new(Catalog::reference().unwrap());
        DiscoverySession::new(RecommendationEngine::new(catalog)).unwrap()
    }

    fn titles(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.title.clone()).collect()
    }

    #[test]
    fn test_initial_state() {
        let session = build_session();

        assert!(session.selected().is_none());
        assert_eq!(session.trending().len(), 8);
        assert_eq!(session.personalized().len(), 6);
        assert!(session.similar().is_empty());
        assert_eq!(session.sentiment_subject(), SentimentSubject::Trending);
        assert_eq!(
            session.sentiment_title(),
            "Sentiment Analysis - Trending Movies"
        );
    }

    #[test]
    fn test_select_unknown_movie() {
        let mut session = build_session();
        assert!(session.select_movie(404).is_err());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_select_movie_excludes_it_from_personalized() {
        let mut session = build_session();
        session.select_movie(3).unwrap();

        assert_eq!(session.selected().unwrap().title, "The Dark Knight");
        assert!(session.personalized().iter().all(|m| m.id != 3));
        assert!(session.similar().iter().all(|m| m.id != 3));
        // personalized ranked six, then dropped the selection
        assert_eq!(session.personalized().len(), 5);
    }

    #[test]
    fn test_blank_search_clears_results() {
        let mut session = build_session();
        assert_eq!(session.search("nolan"), 3);
        assert_eq!(session.sentiment_subject(), SentimentSubject::SearchResults);

        assert_eq!(session.search("   "), 0);
        assert!(session.search_results().is_empty());
        assert_eq!(session.sentiment_subject(), SentimentSubject::Trending);
    }

    #[test]
    fn test_search_title() {
        let mut session = build_session();
        session.search("nolan");
        assert_eq!(
            titles(&session.search_results()),
            vec!["The Dark Knight", "Inception", "Interstellar"]
        );
        assert_eq!(
            session.sentiment_title(),
            "Sentiment Analysis - \"nolan\" Results"
        );
    }

    #[test]
    fn test_suggestions() {
        let session = build_session();
        assert!(session.suggestions("g").is_empty());
        assert_eq!(titles(&session.suggestions("godf")), vec!["The Godfather"]);
    }

    #[test]
    fn test_empty_catalog_has_no_sentiment() {
        let catalog = Arc::new(Catalog::from_movies(Vec::new()).unwrap());
        let session = DiscoverySession::new(RecommendationEngine::new(catalog)).unwrap();

        assert!(session.trending().is_empty());
        assert!(session.sentiment_view().is_err());
        assert!(session.snapshot().sentiment.is_none());
    }
}
