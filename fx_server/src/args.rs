//! Command-line arguments for the quote server.
//!
//! Every flag has a default, so the server runs with none.
use std::time::Duration;

use clap::Parser;
use fx_common::CurrencyPair;
use fx_common::deadline::{FETCH_BUDGET, PERSIST_BUDGET};
use fx_common::net::{DEFAULT_DB_PATH, DEFAULT_LISTEN_ADDR, DEFAULT_UPSTREAM_URL};

use crate::handler::Budgets;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Serves the latest currency quote on GET /cotacao", long_about = None)]
pub struct Args {
    /// Address to listen on.
    #[clap(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Base URL of the upstream pricing API; the pair code is appended.
    #[clap(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// SQLite database file (`:memory:` for a throwaway store).
    #[clap(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: String,

    /// Currency pair to quote.
    #[clap(long, value_enum, default_value_t = CurrencyPair::UsdBrl)]
    pub pair: CurrencyPair,

    /// Budget for the upstream fetch, in milliseconds.
    #[clap(long, default_value_t = FETCH_BUDGET.as_millis() as u64)]
    pub fetch_budget_ms: u64,

    /// Budget for the storage write, in milliseconds.
    #[clap(long, default_value_t = PERSIST_BUDGET.as_millis() as u64)]
    pub persist_budget_ms: u64,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub listen: String,
    /// Upstream API base URL.
    pub upstream_url: String,
    /// SQLite database path.
    pub db_path: String,
    /// Pair to quote.
    pub pair: CurrencyPair,
    /// Phase budgets.
    pub budgets: Budgets,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            pair: CurrencyPair::default(),
            budgets: Budgets::default(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            listen: args.listen,
            upstream_url: args.upstream_url,
            db_path: args.db_path,
            pair: args.pair,
            budgets: Budgets {
                fetch: Duration::from_millis(args.fetch_budget_ms),
                persist: Duration::from_millis(args.persist_budget_ms),
            },
        }
    }
}
