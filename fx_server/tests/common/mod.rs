//! Integration test common infrastructure.
//!
//! Provides a mock upstream pricing API, store doubles that are slow or broken on
//! purpose, and a helper that serves the real router on an ephemeral port.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use fx_common::{CurrencyPair, Deadline};
use fx_server::app::serve;
use fx_server::{AppState, Budgets, QuoteStore, StoreError, UpstreamClient};
use tokio::net::TcpListener;
use tokio::time::sleep;

/// Canonical upstream payload.
pub const USD_BRL_PAYLOAD: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","bid":"5.43","ask":"5.44"}}"#;

/// Bind an ephemeral port and serve `app` in the background.
pub async fn spawn_router(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    fail_first: usize,
    hits: AtomicUsize,
}

/// Fake pricing API answering `GET /json/last/{pair}`.
pub struct MockUpstream {
    /// Base URL to hand to `UpstreamClient` (`.../json/last`).
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    /// Serve `body` with 200 after `delay`.
    pub async fn spawn(body: &'static str, delay: Duration) -> Self {
        Self::spawn_with(StatusCode::OK, body, delay, 0).await
    }

    /// Serve 503 for the first `n` calls, then `body` with 200.
    pub async fn failing_first(n: usize, body: &'static str) -> Self {
        Self::spawn_with(StatusCode::OK, body, Duration::ZERO, n).await
    }

    /// Serve `body` with `status`.
    pub async fn with_status(status: StatusCode, body: &'static str) -> Self {
        Self::spawn_with(status, body, Duration::ZERO, 0).await
    }

    async fn spawn_with(
        status: StatusCode,
        body: &'static str,
        delay: Duration,
        fail_first: usize,
    ) -> Self {
        let state = Arc::new(MockState {
            status,
            body,
            delay,
            fail_first,
            hits: AtomicUsize::new(0),
        });
        let app = Router::new()
            .route("/json/last/{pair}", get(mock_quote))
            .with_state(Arc::clone(&state));
        let base = spawn_router(app).await;
        Self {
            base_url: format!("{}/json/last", base),
            state,
        }
    }

    /// Number of requests the mock has received.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn mock_quote(State(state): State<Arc<MockState>>) -> (StatusCode, &'static str) {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    sleep(state.delay).await;
    if hit < state.fail_first {
        return (StatusCode::SERVICE_UNAVAILABLE, "busy");
    }
    (state.status, state.body)
}

/// Store that waits `delay` (inside the caller's deadline) before delegating.
pub struct SlowStore<S> {
    pub inner: S,
    pub delay: Duration,
}

#[async_trait]
impl<S: QuoteStore> QuoteStore for SlowStore<S> {
    async fn insert_bid(&self, bid: &str, deadline: &Deadline) -> Result<i64, StoreError> {
        deadline.run(sleep(self.delay)).await?;
        self.inner.insert_bid(bid, deadline).await
    }
}

/// Store whose backend is gone.
pub struct BrokenStore;

#[async_trait]
impl QuoteStore for BrokenStore {
    async fn insert_bid(&self, _bid: &str, _deadline: &Deadline) -> Result<i64, StoreError> {
        Err(StoreError::Sqlx(sqlx::Error::PoolClosed))
    }
}

/// Serve the real router with the given collaborators; returns the `/cotacao` URL.
pub async fn spawn_server(
    upstream_base: &str,
    store: Arc<dyn QuoteStore>,
    budgets: Budgets,
) -> String {
    let upstream = UpstreamClient::new(upstream_base, CurrencyPair::UsdBrl);
    let state = AppState::new(upstream, store, budgets);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, state, std::future::pending()).await.unwrap();
    });
    format!("http://{}/cotacao", addr)
}

/// Budgets large enough that only a deliberately slowed collaborator can blow them.
pub fn roomy_budgets() -> Budgets {
    Budgets {
        fetch: Duration::from_secs(2),
        persist: Duration::from_secs(2),
    }
}
