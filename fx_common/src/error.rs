//! Error types shared between the server and the requester.
//!
//! `QuoteError` covers everything that can go wrong while obtaining a quote over HTTP:
//! building or sending the request, a non-success status, an undecodable payload, a
//! missing pair entry, a blown deadline, and the requester's file write. Storage
//! failures are the server's concern and live there.
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::deadline::Phase;

/// A phase did not finish inside its budget.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{phase} phase exceeded its {}ms budget", .budget.as_millis())]
pub struct DeadlineExceeded {
    /// Phase whose deadline fired.
    pub phase: Phase,
    /// Budget the phase was given.
    pub budget: Duration,
}

/// Unified error type for fetching a quote.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error while writing the output artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Request could not be built or the transport failed (DNS, refused, TLS, reset).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote side answered with a non-success status.
    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    /// Payload was not the JSON shape we expect.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Quote board did not carry an entry for the requested pair.
    #[error("pair not found in payload: {0}")]
    MissingPair(String),

    /// The phase ran out of time.
    #[error(transparent)]
    Deadline(#[from] DeadlineExceeded),
}

impl QuoteError {
    /// Returns `true` when the error is a deadline firing rather than a hard failure.
    pub fn is_deadline(&self) -> bool {
        matches!(self, QuoteError::Deadline(_))
    }
}
