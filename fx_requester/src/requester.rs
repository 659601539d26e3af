//! One bounded call to the quote server.
//!
//! The whole exchange (connect, send, status, full body read) runs inside a single
//! `request` deadline. The output file is touched only after the body is complete, so
//! any failure leaves the previous artifact exactly as it was. The body is staged in a
//! temporary file next to the output and renamed over it, so readers never see a
//! partial write.
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fx_common::net::get_bytes;
use fx_common::{Deadline, Phase, Result};
use log::info;
use reqwest::Client;

use crate::args::RequesterConfig;

/// Raw bytes of a successful response and where they were written.
#[derive(Debug, Clone)]
pub struct SavedQuote {
    /// File the body was written to.
    pub path: PathBuf,
    /// Response body, byte for byte.
    pub body: Vec<u8>,
}

impl SavedQuote {
    /// Body as text for logging.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Fetch one quote and save it, using a fresh HTTP client.
pub async fn run(config: &RequesterConfig) -> Result<SavedQuote> {
    fetch_and_save(&Client::new(), config).await
}

/// Fetch one quote with `client` and write the body to `config.output`.
pub async fn fetch_and_save(client: &Client, config: &RequesterConfig) -> Result<SavedQuote> {
    let deadline = Deadline::start(Phase::Request, config.budget);
    info!("Requesting quote from {}", config.server_url);
    let body = get_bytes(client, &config.server_url, &deadline).await?;

    let path = config.output.clone();
    let saved = tokio::task::spawn_blocking(move || -> io::Result<SavedQuote> {
        replace_file(&path, &body)?;
        Ok(SavedQuote { path, body })
    })
    .await
    .map_err(io::Error::other)??;
    info!("Quote saved to {}: {}", saved.path.display(), saved.as_text());
    Ok(saved)
}

fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}
