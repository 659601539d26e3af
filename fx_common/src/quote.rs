//! Quote data model and JSON helpers.
//!
//! A `Quote` carries a single `bid`, kept as the decimal string the upstream sent so no
//! precision is lost on the way to storage and back out. The upstream payload is a
//! "quote board": an object keyed by undashed pair code (`USDBRL`) to a quote record
//! with many more fields than we keep.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::pairs::CurrencyPair;

/// Exchange rate quote for one currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Decimal-formatted bid, e.g. `"5.4312"`.
    pub bid: String,
}

/// Upstream payload: pair key to quote record.
pub type QuoteBoard = HashMap<String, Quote>;

impl Quote {
    /// Create a quote from a bid string.
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }

    /// Decode an upstream payload and pick the entry for `pair`.
    pub fn from_board_bytes(bytes: &[u8], pair: CurrencyPair) -> Result<Quote, QuoteError> {
        let mut board: QuoteBoard = serde_json::from_slice(bytes)?;
        let key = pair.payload_key();
        board.remove(&key).ok_or(QuoteError::MissingPair(key))
    }

    /// Encode the quote to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, QuoteError> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}
