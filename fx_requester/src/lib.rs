//! Quote requester library.
//!
//! - `args`: clap flags and the resolved `RequesterConfig`.
//! - `requester`: the single deadline-bound call and the file write.
#![warn(missing_docs)]
pub mod args;
pub mod requester;

pub use args::{Args, RequesterConfig};
pub use requester::{SavedQuote, fetch_and_save, run};
