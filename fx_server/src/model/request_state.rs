//! Lifecycle of a single quote request.
//!
//! ```text
//! received → fetching → fetched ─→ persisting → persisted ─────→ responding (200)
//!                    └→ fetch_failed ─────────────────────────→ responding (500)
//!                                            └→ persist_failed → responding (500)
//! ```
//!
//! The tracker is owned by the handler future; nothing here is shared between requests.

use axum::http::StatusCode;
use log::{debug, warn};
use strum_macros::Display;

/// Where a request is in its pipeline.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RequestState {
    Received,
    Fetching,
    Fetched,
    FetchFailed,
    Persisting,
    Persisted,
    PersistFailed,
    Responding,
}

impl RequestState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Received, Fetching)
                | (Fetching, Fetched)
                | (Fetching, FetchFailed)
                | (Fetched, Persisting)
                | (Persisting, Persisted)
                | (Persisting, PersistFailed)
                | (FetchFailed, Responding)
                | (Persisted, Responding)
                | (PersistFailed, Responding)
        )
    }

    /// Status a request settled in this state answers with, if it has settled.
    pub fn status(self) -> Option<StatusCode> {
        match self {
            RequestState::Persisted => Some(StatusCode::OK),
            RequestState::FetchFailed | RequestState::PersistFailed => {
                Some(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => None,
        }
    }
}

/// Tracks and logs one request's transitions.
#[derive(Debug)]
pub struct RequestTracker {
    state: RequestState,
    outcome: Option<StatusCode>,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    /// A freshly received request.
    pub fn new() -> Self {
        Self {
            state: RequestState::Received,
            outcome: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Status decided by the last settling state, once there is one.
    pub fn outcome(&self) -> Option<StatusCode> {
        self.outcome
    }

    /// Move to `next`. Illegal transitions are logged and ignored.
    pub fn advance(&mut self, next: RequestState) -> bool {
        if !self.state.can_advance_to(next) {
            warn!("Ignoring illegal request transition {} -> {}", self.state, next);
            return false;
        }
        debug!("request {} -> {}", self.state, next);
        if let Some(status) = next.status() {
            self.outcome = Some(status);
        }
        self.state = next;
        true
    }
}
