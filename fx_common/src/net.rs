//! Shared networking defaults and the deadline-bound GET used by both sides.

use log::debug;
use reqwest::Client;

use crate::deadline::Deadline;
use crate::error::QuoteError;
use crate::pairs::CurrencyPair;

/// Route the server exposes.
pub const QUOTE_ROUTE: &str = "/cotacao";
/// Server bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// Where the requester finds the server.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";
/// Base of the upstream pricing API; the pair code is appended as the last segment.
pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last";
/// File the requester writes the raw response to.
pub const DEFAULT_OUTPUT_FILE: &str = "cotacao.txt";
/// SQLite file the server persists quotes to.
pub const DEFAULT_DB_PATH: &str = "cotacoes.db";

/// Helper to build the upstream URL for a pair like "<base>/USD-BRL".
pub fn quote_url(base: &str, pair: CurrencyPair) -> String {
    format!("{}/{}", base.trim_end_matches('/'), pair.path_code())
}

/// Issue one GET to `url` and read the whole body, all inside `deadline`.
///
/// Non-2xx statuses are errors. The response is released when this returns, whether
/// the body was read, the status rejected, or the deadline fired.
pub async fn get_bytes(
    client: &Client,
    url: &str,
    deadline: &Deadline,
) -> Result<Vec<u8>, QuoteError> {
    debug!("GET {} ({} phase, {:?} left)", url, deadline.phase(), deadline.remaining());
    deadline
        .run(async {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(QuoteError::Status(status.as_u16()));
            }
            let body = response.bytes().await?;
            Ok::<_, QuoteError>(body.to_vec())
        })
        .await?
}
