//! Error types for the quote server.
//!
//! Three layers:
//! - `StoreError`: anything the storage backend can report, plus a blown persist deadline.
//! - `PipelineError`: the per-request error boundary. Every variant becomes an opaque
//!   plain-text 500; the cause stays in the server log.
//! - `ServerError`: startup and listener failures, which end the process.
use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fx_common::{DeadlineExceeded, QuoteError};
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver-level failure (unavailable, locked, constraint violation, ...).
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Insert did not finish inside the persist budget.
    #[error(transparent)]
    Deadline(#[from] DeadlineExceeded),

    /// The detached persist task died before reporting back.
    #[error("persist task failed: {0}")]
    Task(String),
}

/// Failure of one request's fetch/persist pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Upstream quote could not be obtained.
    #[error("fetch phase failed: {0}")]
    Fetch(#[source] QuoteError),

    /// Quote was fetched but could not be stored.
    #[error("persist phase failed: {0}")]
    Persist(#[source] StoreError),
}

impl PipelineError {
    /// Body sent to the client; never carries the underlying cause.
    pub fn public_message(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "failed to fetch quote",
            PipelineError::Persist(_) => "failed to save quote",
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}

/// Fatal server errors.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Binding or serving on the listener failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Store could not be opened or its table created.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
