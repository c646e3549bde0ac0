//! File naming for archived articles.
//!
//! An article is saved as `{dir}/{date}_{slug}.{ext}` where `date` is the
//! part of the sitemap `lastmod` before the `T`, and `slug` is the last
//! non-empty path segment of the article URL. Without a `lastmod` the name is
//! just `{slug}.{ext}`.
//!
//! Two articles with the same date and slug map to the same file and the
//! later one overwrites the earlier.

use super::OutputFormat;
use std::path::{Path, PathBuf};
use url::Url;

const DATE_TIME_SEPARATOR: char = 'T';

/// Where to write `url` in `format` under `base_dir`.
pub fn article_path(
    url: &str,
    last_modified: &str,
    base_dir: &Path,
    format: OutputFormat,
) -> PathBuf {
    let slug = last_path_segment(url);
    let file_name = match date_prefix(last_modified) {
        Some(date) => format!("{}_{}.{}", date, slug, format.extension()),
        None => format!("{}.{}", slug, format.extension()),
    };
    base_dir.join(file_name)
}

/// The date part of a `lastmod` value, if there is one.
fn date_prefix(last_modified: &str) -> Option<&str> {
    let date = last_modified
        .trim()
        .split(DATE_TIME_SEPARATOR)
        .next()
        .unwrap_or_default();
    (!date.is_empty()).then_some(date)
}

/// The last non-empty path segment of `url`, ignoring trailing slashes.
///
/// Falls back to the host for URLs with an empty path, and to plain string
/// splitting for anything `Url` cannot parse.
pub fn last_path_segment(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string)
            .or_else(|| parsed.host_str().map(str::to_string))
            .unwrap_or_else(|| "index".to_string()),
        Err(_) => url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("index")
            .to_string(),
    }
}
