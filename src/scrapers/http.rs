//! Anonymous retrieval over plain HTTP.
//!
//! Used for free posts. Each URL gets a single timed `GET`; the body is
//! returned whatever the status code, since paywall and error pages are
//! recognised later by the extractor finding no article body.

use super::ContentFetcher;
use crate::error::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the sitemap reader and [`HttpFetcher`].
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ScrapeError::HttpClient)
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ContentFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&mut self, url: &str) -> Result<String> {
        let fetch_err = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(fetch_err)?;
        let status = resp.status();
        let body = resp.text().await.map_err(fetch_err)?;
        debug!(%status, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
