//! Quote HTTP server.
//!
//! Listens on `0.0.0.0:8080` by default and answers `GET /cotacao` with the latest
//! USD-BRL bid, persisting every served quote to `cotacoes.db`. See `fx_server::args`
//! for the flags that override those defaults.
//!
//! A failed request is logged and answered with 500; the server keeps running. The
//! process exits non-zero only when the store cannot be opened or the listener fails,
//! and exits cleanly on Ctrl+C.
use clap::Parser;
use fx_server::ServerError;
use fx_server::app;
use fx_server::args::{Args, ServerConfig};
use log::error;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_logger();
    let config = ServerConfig::from(Args::parse());
    if let Err(e) = app::run(config).await {
        error!("Server stopped: {}", e);
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
