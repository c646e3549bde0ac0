//! Newsletter sitemap reader.
//!
//! Substack publishes every post in a flat `urlset` sitemap:
//!
//! ```xml
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.substack.com/p/my-article</loc>
//!     <lastmod>2024-03-05T12:00:00Z</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! A `<url>` without a `<loc>` is dropped. `<lastmod>` is optional and kept
//! verbatim. Any retrieval or parse failure is returned as an error; the
//! caller never sees a partial URL list.

use crate::error::{Result, ScrapeError};
use crate::models::{Sitemap, SitemapEntry};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct UrlSet {
    #[serde(rename = "url", default)]
    urls: Vec<UrlTag>,
}

#[derive(Debug, Deserialize)]
struct UrlTag {
    loc: Option<String>,
    lastmod: Option<String>,
}

/// Join the newsletter base URL and the sitemap path with exactly one `/`.
pub fn sitemap_url(newsletter_url: &str, sitemap_path: &str) -> String {
    format!(
        "{}/{}",
        newsletter_url.trim_end_matches('/'),
        sitemap_path.trim_start_matches('/')
    )
}

/// Download and parse the sitemap at `sitemap_url`.
///
/// The request timeout comes from `client`. Non-success status codes are
/// treated as retrieval failures.
#[instrument(level = "info", skip(client))]
pub async fn index_articles(client: &Client, sitemap_url: &str) -> Result<Sitemap> {
    let fetch_err = |source| ScrapeError::SitemapFetch {
        url: sitemap_url.to_string(),
        source,
    };

    let body = client
        .get(sitemap_url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(fetch_err)?
        .text()
        .await
        .map_err(fetch_err)?;
    debug!(bytes = body.len(), "Downloaded sitemap");

    let sitemap = parse_sitemap(&body)?;
    info!(count = sitemap.len(), "Indexed sitemap article URLs");
    Ok(sitemap)
}

/// Parse a `urlset` document into a [`Sitemap`], preserving document order.
pub fn parse_sitemap(xml: &str) -> Result<Sitemap> {
    let set: UrlSet = quick_xml::de::from_str(xml)?;

    let entries = set
        .urls
        .into_iter()
        .filter_map(|tag| {
            let url = tag.loc.map(|loc| loc.trim().to_string())?;
            if url.is_empty() {
                return None;
            }
            Some(SitemapEntry {
                url,
                last_modified: tag
                    .lastmod
                    .map(|l| l.trim().to_string())
                    .unwrap_or_default(),
            })
        })
        .collect();

    Ok(Sitemap::new(entries))
}
