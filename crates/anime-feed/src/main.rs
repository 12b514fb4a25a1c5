//! Anime feed CLI application.

use anime_feed::carousel::{featured_lineup, Carousel};
use anime_feed::{AnimeApiClient, FeaturedAnime, Fetched};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::Config;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the upstream base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Write log files to this directory
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Home page sections
    Home,
    /// Weekly release schedule
    Schedule,
    /// Currently airing anime
    Ongoing {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Finished anime
    Completed {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Movie listing
    Movies {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Batch download listing
    Batches {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search anime by title
    Search {
        query: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Genre index
    Genres,
    /// Anime in one genre
    Genre {
        slug: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Anime page
    Anime { slug: String },
    /// Episode list of an anime
    Episodes { slug: String },
    /// Episode watch page
    Episode { slug: String },
    /// Batch download page
    Batch { slug: String },
    /// Stream server link
    Server { id: String },
    /// Simulate the home page banner rotation
    Carousel {
        /// Number of timer ticks to simulate
        #[arg(long, default_value_t = 3)]
        ticks: usize,

        /// Index selected manually after the ticks
        #[arg(long)]
        select: Option<usize>,
    },
}

/// One-line note telling live data from placeholder data
fn provenance<T>(fetched: &Fetched<T>) -> String {
    match fetched.error() {
        Some(e) => format!("source: fallback ({}: {})", e.kind(), e),
        None => "source: live".to_string(),
    }
}

/// Print a fetched value as JSON on stdout and its provenance on stderr
fn emit<T: Serialize>(fetched: Fetched<T>) -> Result<()> {
    if let Some(e) = fetched.error() {
        warn!(kind = e.kind(), error = %e, "Upstream unavailable, showing placeholder data");
    }
    eprintln!("{}", provenance(&fetched));

    let json = serde_json::to_string_pretty(fetched.value()).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

fn simulate_carousel(ticks: usize, select: Option<usize>) -> Result<()> {
    let mut carousel =
        Carousel::new(featured_lineup()).context("Featured lineup is empty")?;
    let mut frames = Vec::with_capacity(ticks + 2);

    let mut record = |event: &str, carousel: &Carousel<FeaturedAnime>| {
        frames.push(serde_json::json!({
            "event": event,
            "index": carousel.index(),
            "title": carousel.current().title,
        }));
    };

    record("start", &carousel);
    for _ in 0..ticks {
        carousel.tick();
        record("tick", &carousel);
    }
    if let Some(index) = select {
        if !carousel.select(index) {
            warn!(index, len = carousel.len(), "Selection out of range, ignored");
        }
        record("select", &carousel);
    }

    println!("{}", serde_json::to_string_pretty(&frames)?);
    Ok(())
}

/// Command-line flags take precedence over the file and the environment
fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(log_dir) = &args.log_dir {
        config.logging.log_dir = log_dir.clone();
        config.logging.file = true;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?
        .with_env_overrides();

    apply_overrides(&mut config, &args);

    let mut log_config = shared::LogConfig::from_settings(&config.logging, "anime-feed");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    // Config loading ran before the subscriber existed
    if args.config.exists() {
        info!(path = %args.config.display(), "Configuration loaded");
    } else {
        warn!(path = %args.config.display(), "Config file not found, using defaults");
    }

    info!(base_url = %config.api.base_url, "Anime feed starting");

    let client = AnimeApiClient::new(&config.api).context("Failed to create API client")?;

    match args.command {
        Command::Home => emit(client.home().await),
        Command::Schedule => emit(client.schedule().await),
        Command::Ongoing { page } => emit(client.ongoing(page).await),
        Command::Completed { page } => emit(client.completed(page).await),
        Command::Movies { page } => emit(client.movies(page).await),
        Command::Batches { page } => emit(client.batches(page).await),
        Command::Search { query, page } => emit(client.search(&query, page).await),
        Command::Genres => emit(client.genres().await),
        Command::Genre { slug, page } => emit(client.anime_by_genre(&slug, page).await),
        Command::Anime { slug } => emit(client.anime_detail(&slug).await),
        Command::Episodes { slug } => emit(client.anime_episodes(&slug).await),
        Command::Episode { slug } => emit(client.episode_detail(&slug).await),
        Command::Batch { slug } => emit(client.batch_detail(&slug).await),
        Command::Server { id } => emit(client.server_link(&id).await),
        Command::Carousel { ticks, select } => simulate_carousel(ticks, select),
    }
}
