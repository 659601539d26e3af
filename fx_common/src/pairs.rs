//! Currency pairs understood by the upstream pricing API.
//!
//! A pair has two spellings: the dashed path code used in the request URL
//! (`USD-BRL`) and the undashed key the payload files the quote under (`USDBRL`).

use clap::ValueEnum;
use strum_macros::{Display, EnumString};

/// Set of supported currency pairs.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, ValueEnum, Display, EnumString, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum CurrencyPair {
    #[default]
    #[strum(serialize = "USD-BRL")]
    #[value(name = "USD-BRL")]
    UsdBrl,
    #[strum(serialize = "EUR-BRL")]
    #[value(name = "EUR-BRL")]
    EurBrl,
    #[strum(serialize = "GBP-BRL")]
    #[value(name = "GBP-BRL")]
    GbpBrl,
    #[strum(serialize = "BTC-BRL")]
    #[value(name = "BTC-BRL")]
    BtcBrl,
    #[strum(serialize = "USD-EUR")]
    #[value(name = "USD-EUR")]
    UsdEur,
}

impl CurrencyPair {
    /// Dashed code used as the last URL segment, e.g. `USD-BRL`.
    pub fn path_code(&self) -> String {
        self.to_string()
    }

    /// Key the quote board files this pair under, e.g. `USDBRL`.
    pub fn payload_key(&self) -> String {
        self.to_string().replace('-', "")
    }
}
