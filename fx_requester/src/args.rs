//! Command-line arguments for the quote requester.
//!
//! This module defines the CLI interface using `clap`. Every flag has a default, so
//! the requester runs with none.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fx_common::deadline::REQUEST_BUDGET;
use fx_common::net::{DEFAULT_OUTPUT_FILE, DEFAULT_SERVER_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Fetches one quote from the quote server and saves it", long_about = None)]
pub struct Args {
    /// Full URL of the server's quote route.
    #[clap(long, default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// File the raw response body is written to.
    #[clap(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Budget for the whole call, in milliseconds.
    #[clap(long, default_value_t = REQUEST_BUDGET.as_millis() as u64)]
    pub timeout_ms: u64,
}

/// Resolved requester configuration.
#[derive(Debug, Clone)]
pub struct RequesterConfig {
    /// Quote route to GET.
    pub server_url: String,
    /// Output artifact path.
    pub output: PathBuf,
    /// Request phase budget.
    pub budget: Duration,
}

impl Default for RequesterConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            budget: REQUEST_BUDGET,
        }
    }
}

impl From<Args> for RequesterConfig {
    fn from(args: Args) -> Self {
        Self {
            server_url: normalize_url(&args.server_url),
            output: args.output,
            budget: Duration::from_millis(args.timeout_ms),
        }
    }
}

/// Trim whitespace and matching quotes from a CLI-provided URL.
fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
