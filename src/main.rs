//! Headline Harvester main entry point
//!
//! This is the command-line interface for the Headline Harvester service.

use anyhow::Context;
use clap::Parser;
use headline_harvester::api::{routes, store_batch, AppState};
use headline_harvester::config::{load_config_with_hash, Config};
use headline_harvester::crawler::{CrawlRequest, Harvester};
use headline_harvester::storage::{open_storage, SqliteStorage};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Headline Harvester: on-demand headline extraction
///
/// Headline Harvester fetches seed pages while respecting robots.txt,
/// extracts their headings, optionally follows each heading's link for an
/// article excerpt, and filters the results by keyword.
#[derive(Parser, Debug)]
#[command(name = "headline-harvester")]
#[command(version)]
#[command(about = "On-demand headline extraction service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a single request file instead of serving the API
    #[arg(long, value_name = "FILE", conflicts_with = "stats")]
    batch: Option<PathBuf>,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "batch")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.stats {
        handle_stats(&config)
    } else if let Some(batch_path) = cli.batch {
        handle_batch(&config, &batch_path).await
    } else {
        handle_serve(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("headline_harvester=info,warn"),
            1 => EnvFilter::new("headline_harvester=debug,tower_http=debug,info"),
            2 => EnvFilter::new("headline_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Opens the configured database, if any
fn open_configured_storage(config: &Config) -> anyhow::Result<Option<SqliteStorage>> {
    match &config.storage.database_path {
        Some(path) => {
            let storage = open_storage(Path::new(path))
                .with_context(|| format!("Failed to open database {}", path))?;
            tracing::info!("Persisting documents to {}", path);
            Ok(Some(storage))
        }
        None => {
            tracing::info!("No database configured, persistence disabled");
            Ok(None)
        }
    }
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use headline_harvester::output::{load_statistics, print_statistics};

    let Some(path) = &config.storage.database_path else {
        anyhow::bail!("No database configured; set [storage] database-path");
    };
    println!("Database: {}\n", path);

    let storage = open_storage(Path::new(path))
        .with_context(|| format!("Failed to open database {}", path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --batch mode: runs one request file and prints the result
async fn handle_batch(config: &Config, batch_path: &Path) -> anyhow::Result<()> {
    let body = std::fs::read(batch_path)
        .with_context(|| format!("Failed to read {}", batch_path.display()))?;
    let tasks = CrawlRequest::from_json(&body)?.into_tasks()?;
    tracing::info!("Running {} seeds from {}", tasks.len(), batch_path.display());

    let harvester = Harvester::new(config)?;
    let batch = harvester.run_batch(&tasks).await;

    println!("{}", batch.to_pretty_json()?);

    if let Some(storage) = open_configured_storage(config)? {
        store_batch(&Mutex::new(storage), &batch);
    }

    Ok(())
}

/// Handles the default mode: serves the HTTP API until interrupted
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    let harvester = Harvester::new(&config)?;
    let storage = open_configured_storage(&config)?.map(|s| Arc::new(Mutex::new(s)));
    let app = routes(Arc::new(AppState::new(harvester, storage)));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    tracing::info!("Listening on {}", config.server.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
