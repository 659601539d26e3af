//! Client for the upstream pricing API.
use fx_common::net::{get_bytes, quote_url};
use fx_common::{CurrencyPair, Deadline, Quote, QuoteError};
use reqwest::Client;

/// Fetches the current quote for one currency pair.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    pair: CurrencyPair,
}

impl UpstreamClient {
    /// Create a client for `pair` against the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, pair: CurrencyPair) -> Self {
        Self::with_client(Client::new(), base_url, pair)
    }

    /// Create a client with a custom HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>, pair: CurrencyPair) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            pair,
        }
    }

    /// Pair this client quotes.
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// Full URL the client GETs, e.g. `.../json/last/USD-BRL`.
    pub fn url(&self) -> String {
        quote_url(&self.base_url, self.pair)
    }

    /// Fetch the board and select this client's pair, all inside `deadline`.
    ///
    /// Fails on transport errors, non-2xx status, undecodable payload, missing pair or
    /// the deadline firing. No retry.
    pub async fn fetch(&self, deadline: &Deadline) -> Result<Quote, QuoteError> {
        let body = get_bytes(&self.client, &self.url(), deadline).await?;
        Quote::from_board_bytes(&body, self.pair)
    }
}
