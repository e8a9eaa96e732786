//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Groupie Tracker - artists, locations and concert dates in one place
///
/// Fetches the Groupie Trackers API, merges its four collections into one
/// artist view and serves it as HTML.
///
/// Examples:
///   groupie-tracker
///   groupie-tracker --port 3000
///   groupie-tracker --api-url http://localhost:4000/api --verbose
///   groupie-tracker --dump > artists.json
///   groupie-tracker --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Interface to bind the HTTP server to
    #[arg(long, value_name = "HOST", env = "GROUPIE_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    ///
    /// Default: from config or 8080.
    #[arg(short, long, value_name = "PORT", env = "GROUPIE_PORT")]
    pub port: Option<u16>,

    /// Base URL of the remote artist API
    ///
    /// The artists, locations, dates and relation paths are appended to it.
    #[arg(long, value_name = "URL", env = "GROUPIE_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds for the remote API
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .groupie.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Build the aggregate once, print it as JSON and exit
    #[arg(long)]
    pub dump: bool,

    /// Generate a default .groupie.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref path) = self.config {
            if !path.is_file() {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
