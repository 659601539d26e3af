//! Quote server library.
//!
//! Serves `GET /cotacao`: fetches the configured pair's bid from the upstream pricing
//! API under a `fetch` deadline, appends it to SQLite under an independent `persist`
//! deadline, and answers `{"bid": "<value>"}`.
//!
//! - `args`: clap flags and the resolved `ServerConfig`.
//! - `app`: router and serve loop.
//! - `handler`: the per-request pipeline and its injected state.
//! - `upstream`: pricing API client.
//! - `store`: `QuoteStore` capability and the SQLite backend.
//! - `model`: request lifecycle tracking.
//! - `error`: store, pipeline and fatal server errors.
#![warn(missing_docs)]
pub mod app;
pub mod args;
pub mod error;
pub mod handler;
pub mod model;
pub mod store;
pub mod upstream;

pub use error::{PipelineError, ServerError, StoreError};
pub use handler::{AppState, Budgets};
pub use store::{QuoteStore, SqliteStore, StoredQuote};
pub use upstream::UpstreamClient;
