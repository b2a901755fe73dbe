//! Tap-Scraper main entry point
//!
//! This is the command-line interface for the Trade-a-Plane listing scraper.

use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use tap_scraper::config::{
    validate_fetcher_config, validate_query_options, AircraftType, CategoryLevel, FetcherConfig,
    Fractional, QueryOptions, SortKey, SortOrder, TAP_MAX_RETRIES, TAP_MAX_USER_DISTANCE,
    TAP_RETRY_MS, TAP_SEARCH_URL,
};
use tap_scraper::crawler::{list_categories, run_search, Fetcher};
use tap_scraper::output::JsonLinesOutput;
use tracing_subscriber::EnvFilter;

/// Tap: Trade-a-Plane listing scraper
///
/// Searches Trade-a-Plane and writes one JSON object per listing to stdout.
/// Requests are strictly sequential; the site throttles concurrent clients.
#[derive(Parser, Debug)]
#[command(name = "tap")]
#[command(version)]
#[command(about = "Trade-a-Plane", long_about = None)]
struct Cli {
    /// Debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search Trade-a-Plane
    #[command(alias = "s")]
    Search(SearchArgs),

    /// List categories
    #[command(alias = "c")]
    Category(CategoryArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Category type
    #[arg(short = 't', long = "type", value_enum, default_value_t = AircraftType::default())]
    aircraft_type: AircraftType,

    /// Fractional ownership percentage
    #[arg(short, long, value_enum, default_value_t = Fractional::default())]
    fractional: Fractional,

    /// User distance
    #[arg(long, default_value_t = TAP_MAX_USER_DISTANCE)]
    distance: u64,

    /// Make
    #[arg(short, long)]
    make: Option<String>,

    /// Model
    #[arg(short = 'o', long)]
    model: Option<String>,

    /// Model group
    #[arg(short = 'g', long)]
    model_group: Option<String>,

    /// Year range (min-max)
    #[arg(short, long)]
    year: Option<String>,

    /// Price range (min-max)
    #[arg(short, long)]
    price: Option<String>,

    /// Total time range (min-max)
    #[arg(short = 'l', long)]
    total_time: Option<String>,

    /// Sort key
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortOrder::default())]
    sort_order: SortOrder,

    /// Number of results
    #[arg(short, long)]
    number: Option<u64>,

    /// Deep query mode: fetch each listing's detail page
    #[arg(long)]
    deep: bool,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct CategoryArgs {
    /// Category type
    #[arg(short = 't', long = "type", value_enum, default_value_t = AircraftType::default())]
    aircraft_type: AircraftType,

    /// Category level
    #[arg(short, long, value_enum, default_value_t = CategoryLevel::default())]
    level: CategoryLevel,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Maximum fetch attempts per URL
    #[arg(long, default_value_t = TAP_MAX_RETRIES)]
    retries: u32,

    /// Delay between fetch attempts in milliseconds
    #[arg(long, default_value_t = TAP_RETRY_MS)]
    retry_delay_ms: u64,

    /// Search endpoint
    #[arg(long, default_value = TAP_SEARCH_URL, hide = true)]
    search_url: String,
}

impl FetchArgs {
    fn into_config(self) -> FetcherConfig {
        FetcherConfig {
            search_url: self.search_url,
            max_retries: self.retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            ..FetcherConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.debug, cli.verbose, cli.quiet);
    tracing::debug!("command line: {:?}", cli);

    tokio::select! {
        result = run(cli.command) => result,
        _ = shutdown_signal() => {
            tracing::info!("Interrupted, exiting");
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the JSON stream.
fn setup_logging(debug: bool, verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match (debug, verbose) {
            (false, 0) => EnvFilter::new("tap_scraper=info,tap=info,warn"),
            (true, 0) | (_, 1) => EnvFilter::new("tap_scraper=debug,tap=debug,info"),
            _ => EnvFilter::new("tap_scraper=trace,tap=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Dispatches a subcommand
async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Search(args) => handle_search(args).await,
        Command::Category(args) => handle_category(args).await,
    }
}

/// Handles the search subcommand
async fn handle_search(args: SearchArgs) -> anyhow::Result<()> {
    let options = QueryOptions {
        aircraft_type: args.aircraft_type,
        fractional: args.fractional,
        distance: args.distance,
        make: args.make,
        model: args.model,
        model_group: args.model_group,
        year: args.year,
        price: args.price,
        total_time: args.total_time,
        sort: args.sort,
        sort_order: args.sort_order,
        number: args.number,
        deep: args.deep,
        ..QueryOptions::default()
    };
    validate_query_options(&options)?;
    tracing::debug!("search options: {}", serde_json::to_string(&options)?);

    let config = args.fetch.into_config();
    validate_fetcher_config(&config)?;
    let fetcher = Fetcher::new(config)?;

    let mut output = JsonLinesOutput::new(std::io::stdout());
    run_search(&fetcher, &options, &mut output).await?;
    tracing::debug!("wrote {} line(s) to stdout", output.written());

    Ok(())
}

/// Handles the category subcommand
async fn handle_category(args: CategoryArgs) -> anyhow::Result<()> {
    let options = QueryOptions {
        aircraft_type: args.aircraft_type,
        level: args.level,
        ..QueryOptions::default()
    };

    let config = args.fetch.into_config();
    validate_fetcher_config(&config)?;
    let fetcher = Fetcher::new(config)?;

    for level in list_categories(&fetcher, &options).await {
        println!("{}", level);
    }

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
