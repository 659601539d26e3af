//! Per-request bookkeeping for the quote server.
//!
//! - `request_state`: the `received → fetching → ... → responding` lifecycle of one
//!   `GET /cotacao` and the tracker that logs its transitions.

pub mod request_state;
