//! Groupie Tracker - artist aggregator and web front end
//!
//! Fetches the four Groupie Trackers collections (artists, locations,
//! dates, relations), merges them by position into one view of each
//! artist, and serves that view as HTML.
//!
//! Exit codes:
//!   0 - Clean shutdown
//!   1 - Startup or runtime error (bad config, bind failure, failed dump)

mod aggregate;
mod cli;
mod config;
mod error;
mod models;
mod render;
mod server;
mod source;

#[cfg(test)]
mod test_support;

use aggregate::LookupService;
use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use source::SourceClient;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Groupie Tracker v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Fatal: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .groupie.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Serve the site, or print the aggregate when `--dump` is given.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate().context("Invalid configuration")?;

    let client = SourceClient::new(&config.source).context("Failed to create HTTP client")?;
    info!("Remote API: {}", client.base_url());
    let lookup = Arc::new(LookupService::new(client));

    if args.dump {
        return dump(&lookup).await;
    }

    server::run(&config.server, lookup).await
}

/// Handle --dump: build the aggregate once and print it as JSON.
async fn dump(lookup: &LookupService) -> Result<()> {
    let aggregate = lookup
        .list_all()
        .await
        .context("Failed to build artist aggregate")?;

    println!("{}", render::render_json(&aggregate)?);
    info!("Dumped {} artists", aggregate.len());
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
