//! Per-phase time budgets.
//!
//! Every bounded unit of work gets its own `Deadline`, started fresh at the moment the
//! phase begins and passed explicitly to the call it bounds. Deadlines are never derived
//! from one another: a slow fetch cannot eat into the persist window, and the persist
//! window does not shrink because the inbound request is close to its own limit.
//!
//! Budgets:
//! - `request`: requester to server, 300 ms, covers send and full body read.
//! - `fetch`: server to upstream pricing API, 200 ms.
//! - `persist`: server to storage, 10 ms.

use std::future::Future;
use std::time::Duration;

use strum_macros::Display;
use tokio::time::{Instant, timeout_at};

use crate::error::DeadlineExceeded;

/// Budget for the requester's whole call to the server.
pub const REQUEST_BUDGET: Duration = Duration::from_millis(300);
/// Budget for the server's call to the upstream pricing API.
pub const FETCH_BUDGET: Duration = Duration::from_millis(200);
/// Budget for the server's insert into storage.
pub const PERSIST_BUDGET: Duration = Duration::from_millis(10);

/// Named unit of bounded work.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Request,
    Fetch,
    Persist,
}

impl Phase {
    /// Budget this phase gets when nothing overrides it.
    pub fn default_budget(self) -> Duration {
        match self {
            Phase::Request => REQUEST_BUDGET,
            Phase::Fetch => FETCH_BUDGET,
            Phase::Persist => PERSIST_BUDGET,
        }
    }
}

/// A started, fixed time window for one phase.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    phase: Phase,
    budget: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Start a new window of `budget` for `phase`, beginning now.
    pub fn start(phase: Phase, budget: Duration) -> Self {
        Self {
            phase,
            budget,
            expires_at: Instant::now() + budget,
        }
    }

    /// Phase this deadline bounds.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total budget the window was started with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left before the window closes; zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the window has already closed.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// The error this deadline reports when it fires.
    pub fn exceeded(&self) -> DeadlineExceeded {
        DeadlineExceeded {
            phase: self.phase,
            budget: self.budget,
        }
    }

    /// Drive `fut` until it completes or the window closes.
    ///
    /// On expiry the future is dropped, cancelling whatever I/O it had in flight.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, DeadlineExceeded> {
        timeout_at(self.expires_at, fut)
            .await
            .map_err(|_| self.exceeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn phase_names_are_lowercase() {
        assert_eq!(Phase::Request.to_string(), "request");
        assert_eq!(Phase::Fetch.to_string(), "fetch");
        assert_eq!(Phase::Persist.to_string(), "persist");
    }

    #[test]
    fn default_budgets_cascade() {
        assert_eq!(Phase::Request.default_budget(), Duration::from_millis(300));
        assert_eq!(Phase::Fetch.default_budget(), Duration::from_millis(200));
        assert_eq!(Phase::Persist.default_budget(), Duration::from_millis(10));
        assert!(FETCH_BUDGET < REQUEST_BUDGET);
        assert!(PERSIST_BUDGET < FETCH_BUDGET);
    }

    #[tokio::test]
    async fn run_returns_output_inside_budget() {
        let deadline = Deadline::start(Phase::Fetch, Duration::from_secs(1));
        let out = deadline.run(async { 42 }).await;
        assert_eq!(out, Ok(42));
    }

    #[tokio::test]
    async fn run_reports_phase_when_budget_is_blown() {
        let deadline = Deadline::start(Phase::Persist, Duration::from_millis(10));
        let out = deadline.run(sleep(Duration::from_millis(200))).await;
        assert_eq!(
            out,
            Err(DeadlineExceeded {
                phase: Phase::Persist,
                budget: Duration::from_millis(10),
            })
        );
        assert!(deadline.is_expired());
    }

    #[tokio::test]
    async fn fresh_deadline_is_not_shortened_by_an_expired_one() {
        let first = Deadline::start(Phase::Fetch, Duration::from_millis(5));
        let _ = first.run(sleep(Duration::from_millis(50))).await;
        assert!(first.is_expired());

        let second = Deadline::start(Phase::Persist, Duration::from_millis(500));
        assert!(second.remaining() > Duration::from_millis(400));
        assert!(second.run(async {}).await.is_ok());
    }

    #[test]
    fn exceeded_message_names_phase_and_budget() {
        let err = Deadline::start(Phase::Request, REQUEST_BUDGET).exceeded();
        assert_eq!(err.to_string(), "request phase exceeded its 300ms budget");
    }
}
