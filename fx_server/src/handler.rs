//! `GET /cotacao`: the two-phase quote pipeline.
//!
//! 1. Fetch: a fresh `fetch` deadline bounds the upstream call. It lives inside the
//!    handler future, so a client that hangs up drops the future and cancels the fetch.
//! 2. Persist: a fresh `persist` deadline bounds the insert, which runs on a detached
//!    task. Neither the fetch deadline nor the inbound request's cancellation reaches it:
//!    once a quote is fetched its write gets the full persist window.
//!
//! Any failure is logged here with its phase and cause and answered with an opaque 500.
//! The error never escapes the request.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use fx_common::deadline::{FETCH_BUDGET, PERSIST_BUDGET};
use fx_common::{Deadline, Phase, Quote};
use log::{error, info};

use crate::error::{PipelineError, StoreError};
use crate::model::request_state::{RequestState, RequestTracker};
use crate::store::QuoteStore;
use crate::upstream::UpstreamClient;

/// Budgets for the server's two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Upstream fetch window.
    pub fetch: Duration,
    /// Storage write window.
    pub persist: Duration,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            fetch: FETCH_BUDGET,
            persist: PERSIST_BUDGET,
        }
    }
}

/// Everything a request needs, injected into the router.
#[derive(Clone)]
pub struct AppState {
    upstream: UpstreamClient,
    store: Arc<dyn QuoteStore>,
    budgets: Budgets,
}

impl AppState {
    /// Bundle the upstream client, the store capability and the phase budgets.
    pub fn new(upstream: UpstreamClient, store: Arc<dyn QuoteStore>, budgets: Budgets) -> Self {
        Self {
            upstream,
            store,
            budgets,
        }
    }
}

/// Handle one quote request.
pub async fn get_quote(State(state): State<AppState>) -> Result<Json<Quote>, PipelineError> {
    let mut tracker = RequestTracker::new();
    let result = run_pipeline(&state, &mut tracker).await;
    tracker.advance(RequestState::Responding);
    result.map(Json)
}

async fn run_pipeline(
    state: &AppState,
    tracker: &mut RequestTracker,
) -> Result<Quote, PipelineError> {
    tracker.advance(RequestState::Fetching);
    let fetch_deadline = Deadline::start(Phase::Fetch, state.budgets.fetch);
    let quote = match state.upstream.fetch(&fetch_deadline).await {
        Ok(quote) => {
            tracker.advance(RequestState::Fetched);
            quote
        }
        Err(e) => {
            tracker.advance(RequestState::FetchFailed);
            error!("Failed to fetch quote from {}: {}", state.upstream.url(), e);
            return Err(PipelineError::Fetch(e));
        }
    };

    tracker.advance(RequestState::Persisting);
    match persist(Arc::clone(&state.store), quote.bid.clone(), state.budgets.persist).await {
        Ok(id) => {
            tracker.advance(RequestState::Persisted);
            info!("Quote {} = {} saved as row {}", state.upstream.pair(), quote.bid, id);
            Ok(quote)
        }
        Err(e) => {
            tracker.advance(RequestState::PersistFailed);
            error!("Failed to save quote {}: {}", quote.bid, e);
            Err(PipelineError::Persist(e))
        }
    }
}

/// Insert `bid` on a detached task under its own freshly started deadline.
///
/// The deadline starts when the task does, so time spent fetching is never charged to
/// the write. Dropping the caller does not abort the task.
async fn persist(
    store: Arc<dyn QuoteStore>,
    bid: String,
    budget: Duration,
) -> Result<i64, StoreError> {
    let task = tokio::spawn(async move {
        let deadline = Deadline::start(Phase::Persist, budget);
        store.insert_bid(&bid, &deadline).await
    });
    task.await.map_err(|e| StoreError::Task(e.to_string()))?
}
