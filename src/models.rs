//! Data models for sitemap entries and the run manifest.
//!
//! - [`SitemapEntry`]: one `<url>` from the newsletter sitemap
//! - [`Sitemap`]: the ordered entries with a URL to `lastmod` lookup
//! - [`ManifestEntry`]: one successfully archived article in `summary.json`
//! - [`RunSummary`]: discovered vs. processed counts for a finished run

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single article listed in the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// The article URL from `<loc>`.
    pub url: String,
    /// The `<lastmod>` text, or an empty string when the sitemap has none.
    pub last_modified: String,
}

/// All article entries of a sitemap, in document order.
#[derive(Debug, Default, Clone)]
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
    last_modified: HashMap<String, String>,
}

impl Sitemap {
    /// Build a sitemap from entries in document order.
    pub fn new(entries: Vec<SitemapEntry>) -> Self {
        let last_modified = entries
            .iter()
            .map(|e| (e.url.clone(), e.last_modified.clone()))
            .collect();
        Self {
            entries,
            last_modified,
        }
    }

    /// Article URLs in sitemap order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }

    /// The `lastmod` recorded for `url`, or `""` if the sitemap had none.
    pub fn last_modified(&self, url: &str) -> &str {
        self.last_modified.get(url).map(String::as_str).unwrap_or("")
    }

    /// Number of article entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sitemap lists no articles at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A successfully archived article, as written to `summary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub url: String,
    pub last_modified: String,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// URLs listed in the sitemap.
    pub discovered: usize,
    /// Articles written in every output format.
    pub processed: usize,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.discovered - self.processed
    }
}
