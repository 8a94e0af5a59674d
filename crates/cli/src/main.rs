use anyhow::{anyhow, bail, Context, Result};
use catalog::{Catalog, Movie, MovieId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use discovery::{DiscoverySession, SentimentView};
use engine::{
    Insights, PreferenceFilter, RecommendationEngine, ScoredMovie, SentimentBucket,
    SentimentSummary, DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CineMatch - Movie Discovery and Recommendation Engine
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Content-based movie recommendations, trending and sentiment analysis", long_about = None)]
struct Cli {
    /// Path to a JSON movie catalog (defaults to the built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search titles, directors, actors and genres
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },

    /// Search-as-you-type suggestions
    Suggest {
        /// Partially typed query (at least two characters)
        query: String,
    },

    /// List movies in a genre
    Genre {
        /// Genre label or fragment, e.g. "sci-fi" or "thrill"
        genre: String,
    },

    /// List every genre with its movie count
    Genres,

    /// Find movies similar to a given movie
    Similar {
        /// Movie ID to find similar movies for
        #[arg(long)]
        id: MovieId,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        limit: usize,

        /// Drop candidates scoring below this similarity
        #[arg(long, default_value_t = DEFAULT_MIN_SIMILARITY)]
        min_similarity: f32,

        /// Show what each recommendation has in common with the movie
        #[arg(long)]
        explain: bool,
    },

    /// Rank movies matching explicit preferences
    Preferences {
        /// Accept movies with this genre (repeatable)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Accept movies by this director (repeatable)
        #[arg(long = "director")]
        directors: Vec<String>,

        #[arg(long)]
        min_rating: Option<f32>,

        #[arg(long)]
        min_year: Option<u16>,

        #[arg(long)]
        max_year: Option<u16>,

        #[arg(long, default_value_t = DEFAULT_COUNT)]
        limit: usize,
    },

    /// Show trending movies
    Trending {
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        limit: usize,
    },

    /// Sentiment breakdown for some movies (the whole catalog if none given)
    Sentiment {
        /// Movie ID to include (repeatable)
        #[arg(long = "id")]
        ids: Vec<MovieId>,
    },

    /// Walk through a discovery session and print every section
    Discover {
        /// Movie ID to select
        #[arg(long)]
        select: Option<MovieId>,

        /// Search query to run after the selection
        #[arg(long)]
        search: Option<String>,
    },

    /// Run benchmark to test recommendation latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing; stay quiet unless RUST_LOG asks otherwise
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::reference().context("Failed to load the built-in catalog")?,
    };
    info!("Loaded {} movies in {:?}", catalog.len(), start.elapsed());

    let engine = RecommendationEngine::new(Arc::new(catalog));
    let json = cli.json;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search { query } => handle_search(&engine, &query, json)?,
        Commands::Suggest { query } => {
            let suggestions = engine.suggest(&query);
            output_movies(&format!("Suggestions for '{}':", query), &suggestions, json)?
        }
        Commands::Genre { genre } => {
            let movies = engine.find_by_genre(&genre);
            output_movies(&format!("Movies in genre '{}':", genre), &movies, json)?
        }
        Commands::Genres => handle_genres(&engine, json)?,
        Commands::Similar {
            id,
            limit,
            min_similarity,
            explain,
        } => handle_similar(&engine, id, limit, min_similarity, explain, json)?,
        Commands::Preferences {
            genres,
            directors,
            min_rating,
            min_year,
            max_year,
            limit,
        } => {
            let mut filter = PreferenceFilter::new()
                .with_genres(genres)
                .with_directors(directors);
            if let Some(rating) = min_rating {
                filter = filter.with_min_rating(rating);
            }
            if let Some(year) = min_year {
                filter = filter.with_min_year(year);
            }
            if let Some(year) = max_year {
                filter = filter.with_max_year(year);
            }
            handle_preferences(&engine, &filter, limit, json)?
        }
        Commands::Trending { limit } => {
            let trending = engine
                .trending_scored(limit)
                .context("Failed to rank trending movies")?;
            output_scored("Trending Movies:", &trending, None, json)?
        }
        Commands::Sentiment { ids } => handle_sentiment(&engine, &ids, json)?,
        Commands::Discover { select, search } => handle_discover(&engine, select, search, json)?,
        Commands::Benchmark { requests } => handle_benchmark(&engine, requests, json)?,
    }

    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &RecommendationEngine, query: &str, json: bool) -> Result<()> {
    // A blank query means "nothing typed yet", not "everything"
    let results = if query.trim().is_empty() {
        Vec::new()
    } else {
        engine.search(query)
    };
    output_movies(&format!("Search results for '{}':", query), &results, json)
}

/// Handle the 'genres' command
fn handle_genres(engine: &RecommendationEngine, json: bool) -> Result<()> {
    let genres = engine.catalog().genres();

    if json {
        let entries: Vec<serde_json::Value> = genres
            .iter()
            .map(|(genre, count)| serde_json::json!({ "genre": genre, "count": count }))
            .collect();
        return print_json(&entries);
    }

    println!("{}", "Genres:".bold().blue());
    for (genre, count) in genres {
        println!("{}{} ({} movies)", "• ".green(), genre, count);
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    engine: &RecommendationEngine,
    id: MovieId,
    limit: usize,
    min_similarity: f32,
    explain: bool,
    json: bool,
) -> Result<()> {
    let seed = engine
        .get_movie(id)
        .ok_or_else(|| anyhow!("Movie {} not found", id))?;

    let recommendations = engine.recommend_scored(seed, limit, min_similarity);

    let header = format!("Movies similar to {} ({}):", seed.title, seed.year);
    output_scored(&header, &recommendations, explain.then_some(seed), json)
}

/// Handle the 'preferences' command
fn handle_preferences(
    engine: &RecommendationEngine,
    filter: &PreferenceFilter,
    limit: usize,
    json: bool,
) -> Result<()> {
    let recommendations = engine.recommend_by_preferences_scored(filter, limit);

    if !json {
        let pipeline = filter.to_pipeline();
        let active = pipeline.filter_names();
        if active.is_empty() {
            println!("No preferences given, ranking the whole catalog");
        } else {
            println!("Filters: {}", active.join(" -> "));
        }
    }
    output_scored("Personalized Recommendations:", &recommendations, None, json)
}

/// Handle the 'sentiment' command
fn handle_sentiment(engine: &RecommendationEngine, ids: &[MovieId], json: bool) -> Result<()> {
    let movies: Vec<&Movie> = if ids.is_empty() {
        engine.catalog().movies().iter().collect()
    } else {
        ids.iter()
            .map(|&id| {
                engine
                    .get_movie(id)
                    .ok_or_else(|| anyhow!("Movie {} not found", id))
            })
            .collect::<Result<_>>()?
    };

    let summary = engine
        .sentiment_summary(&movies)
        .context("Nothing to analyze")?;
    let insights = engine.insights(&movies).context("Nothing to analyze")?;

    if json {
        return print_json(&serde_json::json!({
            "summary": summary,
            "overall": summary.overall(),
            "insights": insights,
        }));
    }

    let title = if ids.is_empty() {
        "Sentiment Analysis - Whole Catalog".to_string()
    } else {
        format!("Sentiment Analysis - {} Movies", movies.len())
    };
    print_sentiment(&title, &summary, &insights);
    Ok(())
}

/// Handle the 'discover' command
fn handle_discover(
    engine: &RecommendationEngine,
    select: Option<MovieId>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let mut session = DiscoverySession::new(engine.clone())?;

    // Selecting clears the search, so select first
    if let Some(id) = select {
        session.select_movie(id)?;
    }
    if let Some(query) = &search {
        session.search(query);
    }

    if json {
        return print_json(&session.snapshot());
    }

    if let Some(movie) = session.selected() {
        println!("{}", "Selected:".bold().blue());
        print_movie_line(1, movie);
        if !movie.plot.is_empty() {
            println!("   {}", movie.plot.italic());
        }
        println!();
        print_movies("Similar Movies:", &session.similar());
        println!();
    }

    if search.is_some() {
        let header = format!("Search results for '{}':", session.search_query());
        print_movies(&header, &session.search_results());
        println!();
    }

    print_movies("Personalized Picks:", &session.personalized());
    println!();
    print_movies("Trending Now:", &session.trending());
    println!();

    match session.sentiment_view() {
        Ok(view) => print_sentiment_view(&view),
        Err(e) => println!("{} {:#}", "!".yellow(), e),
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(engine: &RecommendationEngine, requests: usize, json: bool) -> Result<()> {
    let movies = engine.catalog().movies();
    if movies.is_empty() {
        bail!("Catalog is empty, nothing to benchmark");
    }
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Pick random seed movies from the catalog
    let seeds: Vec<&Movie> = (0..requests)
        .map(|_| &movies[rand::random::<u32>() as usize % movies.len()])
        .collect();

    let wall_clock = Instant::now();
    let mut timings = Vec::with_capacity(requests);
    for seed in seeds {
        let start = Instant::now();
        let recommendations = engine.recommend(seed, DEFAULT_COUNT, DEFAULT_MIN_SIMILARITY);
        std::hint::black_box(recommendations);
        timings.push(start.elapsed());
    }
    let total_time = wall_clock.elapsed();

    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / (timings.len() as u32);
    timings.sort();
    let p50 = percentile(&timings, 0.50);
    let p95 = percentile(&timings, 0.95);
    let p99 = percentile(&timings, 0.99);
    let throughput = requests as f64 / total_time.as_secs_f64().max(f64::EPSILON);

    if json {
        return print_json(&serde_json::json!({
            "requests": requests,
            "total_us": total_time.as_micros() as u64,
            "mean_us": avg_latency.as_micros() as u64,
            "p50_us": p50.as_micros() as u64,
            "p95_us": p95.as_micros() as u64,
            "p99_us": p99.as_micros() as u64,
            "throughput_per_sec": throughput,
        }));
    }

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} over {} movies", requests, movies.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of an ascending, non-empty slice
fn percentile(sorted: &[Duration], p: f32) -> Duration {
    let index = ((sorted.len() as f32 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn output_movies(header: &str, movies: &[&Movie], json: bool) -> Result<()> {
    if json {
        return print_json(movies);
    }
    print_movies(header, movies);
    Ok(())
}

fn output_scored(
    header: &str,
    scored: &[ScoredMovie<'_>],
    explain_against: Option<&Movie>,
    json: bool,
) -> Result<()> {
    if json {
        return print_json(scored);
    }

    println!("{}", header.bold().blue());
    if scored.is_empty() {
        println!("  (none)");
    }
    for (i, entry) in scored.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Score: {:.2}",
            (i + 1).to_string().green(),
            entry.movie.title,
            entry.movie.year,
            entry.movie.genres.join(", "),
            entry.score
        );
        if let Some(seed) = explain_against {
            println!("   Why: {}", explain_match(seed, entry.movie));
        }
    }
    Ok(())
}

fn print_movies(header: &str, movies: &[&Movie]) {
    println!("{}", header.bold().blue());
    if movies.is_empty() {
        println!("  (none)");
    }
    for (i, movie) in movies.iter().enumerate() {
        print_movie_line(i + 1, movie);
    }
}

fn print_movie_line(rank: usize, movie: &Movie) {
    println!(
        "{}. {} ({}) [{}] {} - {} ({} min)",
        rank.to_string().green(),
        movie.title,
        movie.year,
        movie.genres.join(", "),
        format!("★ {:.1}", movie.rating).yellow(),
        movie.director,
        movie.runtime_minutes
    );
}

fn print_sentiment_view(view: &SentimentView) {
    print_sentiment(&view.title, &view.summary, &view.insights);
}

fn print_sentiment(title: &str, summary: &SentimentSummary, insights: &Insights) {
    println!("{}", title.bold().blue());
    for bucket in [
        SentimentBucket::VeryPositive,
        SentimentBucket::Positive,
        SentimentBucket::Mixed,
    ] {
        let stat = summary.bucket(bucket);
        let label = format!("{:<14}", bucket.to_string());
        let label = match bucket {
            SentimentBucket::VeryPositive => label.green(),
            SentimentBucket::Positive => label.cyan(),
            SentimentBucket::Mixed => label.yellow(),
        };
        println!(
            "{}{} {:>3}% ({} movies)",
            "• ".green(),
            label,
            stat.percentage,
            stat.count
        );
    }
    println!(
        "Overall: {} (average score {:.2} across {} movies)",
        summary.overall().to_string().bold(),
        summary.average_score,
        summary.total
    );
    println!("Highest rating: {:.1}", insights.highest_rating);
    println!("Average rating: {:.1}", insights.average_rating);
    println!("Peak sentiment: {:.0}%", insights.peak_sentiment * 100.0);
}

/// Human-readable reasons `movie` resembles `seed`
fn explain_match(seed: &Movie, movie: &Movie) -> String {
    let mut reasons = Vec::new();

    let shared_genres: Vec<&str> = movie
        .genres
        .iter()
        .filter(|g| seed.genres.contains(g))
        .map(String::as_str)
        .collect();
    if !shared_genres.is_empty() {
        reasons.push(format!("shares {}", shared_genres.join(", ")));
    }

    if movie.director == seed.director {
        reasons.push(format!("also directed by {}", movie.director));
    }

    let shared_actors: Vec<&str> = movie
        .actors
        .iter()
        .filter(|a| seed.actors.contains(a))
        .map(String::as_str)
        .collect();
    if !shared_actors.is_empty() {
        reasons.push(format!("also stars {}", shared_actors.join(", ")));
    }

    let year_gap = (i32::from(movie.year) - i32::from(seed.year)).abs();
    reasons.push(format!(
        "rated {:.1} vs {:.1}, {} years apart",
        movie.rating, seed.rating, year_gap
    ));

    reasons.join("; ")
}
