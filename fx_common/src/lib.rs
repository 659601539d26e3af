//!
//! Common types and utilities shared by the quote server and the requester.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuoteError` and the phase timeout `DeadlineExceeded`.
//! - `result`: handy `Result<T, QuoteError>` alias.
//! - `deadline`: per-phase time budgets and the `Deadline` that enforces them.
//! - `pairs`: currency pairs the upstream pricing API understands.
//! - `quote`: the `Quote` record and the upstream quote board.
//! - `net`: networking defaults and the deadline-bound GET helper.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod pairs;
pub mod quote;
pub mod result;

pub use deadline::{Deadline, Phase};
pub use error::{DeadlineExceeded, QuoteError};
pub use pairs::CurrencyPair;
pub use quote::Quote;
pub use result::Result;
