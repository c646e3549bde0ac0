//! Error types shared by the scrapers, outputs and the pipeline.
//!
//! Errors fall into two groups. Per-article errors ([`ScrapeError::is_fatal`]
//! returns `false`) are logged by the pipeline and the article is skipped.
//! Everything else aborts the run.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to fetch sitemap {url}: {source}")]
    SitemapFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse sitemap: {0}")]
    SitemapParse(#[from] quick_xml::DeError),

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("invalid browser configuration: {0}")]
    BrowserConfig(String),

    #[error("navigation to {url} timed out after {timeout:?}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("login prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

impl ScrapeError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must abort the whole run.
    ///
    /// Fetch-side failures only cost the article being fetched.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::Fetch { .. } | Self::Browser(_) | Self::NavigationTimeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
