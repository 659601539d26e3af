//! Quote Requester. Asks the quote server for the current bid once and writes the raw
//! response to `cotacao.txt`.
//!
//! Usage example (CLI):
//! ```bash
//! fx_requester --server-url http://192.168.0.10:8080/cotacao --output ./cotacao.txt
//! ```
//!
//! Any failure (connection, status, 300 ms deadline, file write) is fatal: the error is
//! logged and the process exits non-zero with the previous output file untouched.
use clap::Parser;
use fx_common::{QuoteError, Result};
use fx_requester::{Args, RequesterConfig, run};
use log::error;

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    init_logger();
    let config = RequesterConfig::from(Args::parse());
    if let Err(e) = run(&config).await {
        error!("Failed to save quote: {}", e);
        return Err(e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
