//! The archiving run, end to end.
//!
//! 1. **Indexing**: read the sitemap (any failure aborts before output is touched)
//! 2. **Bookkeeping**: write `urls.txt`, then empty each format directory
//! 3. **Archiving**: one URL at a time, fetch, extract, convert, write
//! 4. **Manifest**: write `summary.json` and report discovered vs. processed
//!
//! The fetcher is released after the run however it ends.

use crate::error::{Result, ScrapeError};
use crate::models::{ManifestEntry, RunSummary};
use crate::outputs::json::{write_summary, write_url_list};
use crate::outputs::paths::article_path;
use crate::outputs::OutputFormat;
use crate::scrapers::extract::extract_article_html;
use crate::scrapers::{sitemap, ContentFetcher};
use crate::utils::{ensure_dir, reset_dir, truncate_for_log};
use reqwest::Client;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fully resolved sitemap location.
    pub sitemap_url: String,
    /// Root for `urls.txt`, `summary.json` and the format directories.
    pub output_dir: PathBuf,
}

pub struct Pipeline {
    config: PipelineConfig,
    client: Client,
}

impl Pipeline {
    /// `client` is used for the sitemap request only.
    pub fn new(config: PipelineConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Archive every sitemap article with `fetcher`, then release it.
    pub async fn run<F: ContentFetcher>(&self, fetcher: &mut F) -> Result<RunSummary> {
        let result = self.archive(fetcher).await;
        if let Err(e) = fetcher.release().await {
            warn!(error = %e, "Failed to release fetcher");
        }
        result
    }

    fn format_dir(&self, format: OutputFormat) -> PathBuf {
        self.config.output_dir.join(format.extension())
    }

    #[instrument(level = "info", skip_all, fields(sitemap_url = %self.config.sitemap_url))]
    async fn archive<F: ContentFetcher>(&self, fetcher: &mut F) -> Result<RunSummary> {
        info!("Fetching sitemap");
        let sitemap = sitemap::index_articles(&self.client, &self.config.sitemap_url).await?;
        info!(count = sitemap.len(), "Found articles");
        if sitemap.is_empty() {
            warn!("Sitemap lists no articles");
        }

        let output_dir = &self.config.output_dir;
        ensure_dir(output_dir).await?;
        write_url_list(sitemap.urls(), output_dir).await?;
        for format in OutputFormat::ALL {
            reset_dir(&self.format_dir(format)).await?;
        }

        let mut manifest = Vec::new();
        for url in sitemap.urls() {
            info!(%url, "Scraping");

            let page = match fetcher.fetch(url).await {
                Ok(page) => page,
                Err(e) if !e.is_fatal() => {
                    warn!(%url, error = %e, "Fetch failed; skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(article) = extract_article_html(&page) else {
                warn!(%url, "No content found; skipping");
                debug!(%url, page = %truncate_for_log(&page, 300), "Page without article body");
                continue;
            };

            let last_modified = sitemap.last_modified(url);
            for format in OutputFormat::ALL {
                let path = article_path(url, last_modified, &self.format_dir(format), format);
                fs::write(&path, format.convert(&article))
                    .await
                    .map_err(|e| ScrapeError::io(&path, e))?;
                debug!(path = %path.display(), "Wrote article");
            }

            manifest.push(ManifestEntry {
                url: url.to_string(),
                last_modified: last_modified.to_string(),
            });
        }

        write_summary(&manifest, output_dir).await?;

        let summary = RunSummary {
            discovered: sitemap.len(),
            processed: manifest.len(),
        };
        info!(
            discovered = summary.discovered,
            processed = summary.processed,
            skipped = summary.skipped(),
            "Archiving complete"
        );
        Ok(summary)
    }
}
