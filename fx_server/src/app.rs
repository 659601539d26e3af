//! Router assembly and the serve loop.
//!
//! Each accepted connection is driven on its own tokio task by hyper; a failing request
//! is answered and forgotten while the loop keeps accepting. Only a listener failure
//! ends `serve`.
use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use fx_common::net::QUOTE_ROUTE;
use log::{info, warn};
use tokio::net::TcpListener;

use crate::args::ServerConfig;
use crate::error::ServerError;
use crate::handler::{AppState, get_quote};
use crate::store::SqliteStore;
use crate::upstream::UpstreamClient;

/// Build the router: one route, nothing else.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_ROUTE, get(get_quote))
        .with_state(state)
}

/// Serve `state` on `listener` until `shutdown` resolves or the listener fails.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Quote server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Open the store, bind the listener and serve until Ctrl+C.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let store =
        SqliteStore::open_with_busy_timeout(&config.db_path, config.budgets.persist).await?;
    let upstream = UpstreamClient::new(config.upstream_url, config.pair);
    info!(
        "Quoting {} from {} (fetch budget {:?}, persist budget {:?})",
        config.pair,
        upstream.url(),
        config.budgets.fetch,
        config.budgets.persist
    );
    let state = AppState::new(upstream, Arc::new(store), config.budgets);

    let listener = TcpListener::bind(&config.listen).await?;
    serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
