//! moviedeck - TMDB movie browsing CLI.

/// Application configuration (TOML).
mod config;
/// Static route table.
mod routes;
/// Log-based rendering of movies and genres.
mod view;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use crate::routes::{Route, resolve_route, route_table};
use moviedeck_api::tmdb::{
    LocalTmdbApi, TmdbClient, fetch_movies_by_ids, fetch_top_rated_movies, validate_movie_id,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query TMDB API directly.
    Tmdb(TmdbCommand),
    /// Open a browse path (e.g. "/", "/bestmovies", "/watchedmovies", "/movie/550").
    Open(OpenArgs),
    /// List browsable paths.
    Routes,
    /// Manage the watched-movie list.
    Watched(WatchedCommand),
}

/// Arguments for the `tmdb` subcommand.
#[derive(clap::Args)]
struct TmdbCommand {
    /// TMDB subcommand to run.
    #[command(subcommand)]
    command: TmdbSubcommands,
}

/// Available TMDB subcommands.
#[derive(Subcommand)]
enum TmdbSubcommands {
    /// Get movie details.
    Movie(TmdbMovieArgs),
    /// List movie genres.
    Genres,
    /// List top-rated movies over a page range.
    TopRated(TmdbTopRatedArgs),
    /// Get details for several movies at once.
    Movies(TmdbMoviesArgs),
}

/// Arguments for the `tmdb movie` subcommand.
#[derive(clap::Args)]
struct TmdbMovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `tmdb top-rated` subcommand.
#[derive(clap::Args)]
struct TmdbTopRatedArgs {
    /// First page to fetch (1-based).
    #[arg(long, default_value_t = 1)]
    start_page: u32,
    /// Number of pages to fetch.
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

/// Arguments for the `tmdb movies` subcommand.
#[derive(clap::Args)]
struct TmdbMoviesArgs {
    /// Comma-separated movie IDs (e.g. "550,278"). Output keeps this order.
    #[arg(long, required = true, value_delimiter = ',')]
    ids: Vec<String>,
}

/// Arguments for the `open` subcommand.
#[derive(clap::Args)]
struct OpenArgs {
    /// Browse path.
    #[arg(default_value = "/")]
    path: String,
}

/// Arguments for the `watched` subcommand.
#[derive(clap::Args)]
struct WatchedCommand {
    /// Watched subcommand to run.
    #[command(subcommand)]
    command: WatchedSubcommands,
}

/// Available watched-list subcommands.
#[derive(Subcommand)]
enum WatchedSubcommands {
    /// Add a movie ID to the watched list.
    Add(WatchedIdArgs),
    /// Remove a movie ID from the watched list.
    Remove(WatchedIdArgs),
    /// Show the watched movie IDs.
    List,
}

/// Movie ID argument for watched-list edits.
#[derive(clap::Args)]
struct WatchedIdArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: String,
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<(PathBuf, AppConfig)> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok((config_path, config))
}

/// Builds a `TmdbClient` from `TMDB_API_TOKEN` and the config base URL.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the configured base URL
/// is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder().api_token(api_token).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(ref base_url) = config.tmdb.base_url {
        let url: Url = base_url
            .parse()
            .with_context(|| format!("invalid tmdb.base_url in config: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `tmdb movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_movie(args: &TmdbMovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    show_movie(&client, &args.id).await
}

/// Runs the `tmdb genres` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_genres(dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let genres = client
        .fetch_movie_genres()
        .await
        .context("TMDB genre/movie/list request failed")?;
    view::log_genres(&genres);

    Ok(())
}

/// Runs the `tmdb top-rated` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or any page request fails.
#[instrument(skip_all)]
async fn run_tmdb_top_rated(args: &TmdbTopRatedArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    show_best_movies(&client, args.start_page, args.pages).await
}

/// Runs the `tmdb movies` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or any request fails.
#[instrument(skip_all)]
async fn run_tmdb_movies(args: &TmdbMoviesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    show_movies(&client, &args.ids).await
}

/// Runs the `open` subcommand: resolves the path and shows its view.
///
/// # Errors
///
/// Returns an error if the path matches no route, or the view's fetches fail.
#[instrument(skip_all)]
async fn run_open(args: &OpenArgs, dir: Option<&PathBuf>) -> Result<()> {
    let Some(route) = resolve_route(&args.path) else {
        bail!("unknown route: {}", args.path);
    };
    tracing::info!("Opening {} ({})", args.path, route.name());

    let (_, config) = load_config(dir)?;

    if route == Route::WatchedMovies && config.watched.movie_ids.is_empty() {
        tracing::info!("No watched movies. Run `watched add --id <ID>` to add some.");
        return Ok(());
    }

    let client = build_tmdb_client(&config)?;
    match route {
        Route::BestMovies => {
            show_best_movies(
                &client,
                config.best_movies.start_page,
                config.best_movies.page_count,
            )
            .await
        }
        Route::WatchedMovies => show_movies(&client, &config.watched.movie_ids).await,
        Route::Movie { id } => show_movie(&client, &id).await,
    }
}

/// Runs the `routes` subcommand.
fn run_routes() {
    tracing::info!("Path\t\t\tView");
    for (path, name) in route_table() {
        tracing::info!("{path}\t\t{name}");
    }
}

/// Runs the `watched add` / `watched remove` subcommands.
///
/// # Errors
///
/// Returns an error if the ID is blank, an added ID is not a valid movie ID,
/// or the config cannot be read or saved.
#[instrument(skip_all)]
fn run_watched_edit(args: &WatchedIdArgs, add: bool, dir: Option<&PathBuf>) -> Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        bail!("movie id must not be empty");
    }
    if add {
        validate_movie_id(id).with_context(|| format!("invalid movie id: {id}"))?;
    }

    let (config_path, mut config) = load_config(dir)?;
    let changed = if add {
        config.watched.add(id)
    } else {
        config.watched.remove(id)
    };

    if !changed {
        tracing::info!(
            "Movie {} is {} the watched list",
            id,
            if add { "already in" } else { "not in" }
        );
        return Ok(());
    }

    config.save(&config_path).context("failed to save config")?;
    tracing::info!(
        "{} movie {} ({} watched) in {}",
        if add { "Added" } else { "Removed" },
        id,
        config.watched.movie_ids.len(),
        config_path.display()
    );
    Ok(())
}

/// Runs the `watched list` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be read.
#[instrument(skip_all)]
fn run_watched_list(dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;

    if config.watched.movie_ids.is_empty() {
        tracing::info!("No watched movies. Run `watched add --id <ID>` to add some.");
        return Ok(());
    }

    tracing::info!("Watched movies ({}):", config.watched.movie_ids.len());
    for id in &config.watched.movie_ids {
        tracing::info!("  {}", id);
    }
    Ok(())
}

/// Best-movies view: genres and the top-rated page range, fetched together.
async fn show_best_movies(client: &TmdbClient, start_page: u32, page_count: u32) -> Result<()> {
    let (genres, movies) = tokio::try_join!(
        client.fetch_movie_genres(),
        fetch_top_rated_movies(client, start_page, page_count),
    )
    .context("failed to load top-rated movies")?;

    tracing::info!(
        "Top rated: pages {}..{}",
        start_page,
        start_page.saturating_add(page_count)
    );
    view::log_movie_list(&movies, &genres);
    Ok(())
}

/// Watched-movies view: details for each ID, in list order.
async fn show_movies(client: &TmdbClient, ids: &[String]) -> Result<()> {
    let movies = fetch_movies_by_ids(client, ids)
        .await
        .context("failed to load movies")?;
    view::log_movie_list(&movies, &[]);
    Ok(())
}

/// Movie view: details for one ID.
async fn show_movie(client: &TmdbClient, id: &str) -> Result<()> {
    let movie = client
        .fetch_movie_details(id)
        .await
        .with_context(|| format!("failed to load movie {id}"))?;
    view::log_movie_details(&movie);
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Tmdb(tmdb) => match tmdb.command {
            TmdbSubcommands::Movie(args) => run_tmdb_movie(&args, dir).await,
            TmdbSubcommands::Genres => run_tmdb_genres(dir).await,
            TmdbSubcommands::TopRated(args) => run_tmdb_top_rated(&args, dir).await,
            TmdbSubcommands::Movies(args) => run_tmdb_movies(&args, dir).await,
        },
        Commands::Open(args) => run_open(&args, dir).await,
        Commands::Routes => {
            run_routes();
            Ok(())
        }
        Commands::Watched(watched) => match watched.command {
            WatchedSubcommands::Add(args) => run_watched_edit(&args, true, dir),
            WatchedSubcommands::Remove(args) => run_watched_edit(&args, false, dir),
            WatchedSubcommands::List => run_watched_list(dir),
        },
    }
}
