//! Run-level output files: `urls.txt` and `summary.json`.
//!
//! `urls.txt` lists every URL the sitemap returned, one per line, so a run can
//! be audited against what was actually archived. `summary.json` is the
//! manifest of archived articles, written once at the end of the run as a
//! pretty-printed array of `{"url", "lastModified"}` objects.

use crate::error::{Result, ScrapeError};
use crate::models::ManifestEntry;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const URL_LIST_FILE: &str = "urls.txt";
pub const SUMMARY_FILE: &str = "summary.json";

/// Write `urls` to `{output_dir}/urls.txt`, newline-terminated.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_url_list<'a, I>(urls: I, output_dir: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let path = output_dir.join(URL_LIST_FILE);
    let contents: String = urls.into_iter().map(|url| format!("{url}\n")).collect();

    fs::write(&path, contents)
        .await
        .map_err(|e| ScrapeError::io(&path, e))?;
    info!(path = %path.display(), "Saved sitemap URLs");
    Ok(())
}

/// Write the manifest to `{output_dir}/summary.json`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_summary(manifest: &[ManifestEntry], output_dir: &Path) -> Result<()> {
    let path = output_dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(manifest)?;

    fs::write(&path, json)
        .await
        .map_err(|e| ScrapeError::io(&path, e))?;
    info!(path = %path.display(), count = manifest.len(), "Wrote summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_url_list_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        write_url_list(["https://a/p/1", "https://a/p/2"], dir.path())
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join(URL_LIST_FILE)).unwrap();
        assert_eq!(written, "https://a/p/1\nhttps://a/p/2\n");
    }

    #[tokio::test]
    async fn test_empty_url_list() {
        let dir = tempfile::tempdir().unwrap();
        write_url_list(std::iter::empty(), dir.path()).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join(URL_LIST_FILE)).unwrap();
        assert_eq!(written, "");
    }

    #[tokio::test]
    async fn test_summary_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = vec![ManifestEntry {
            url: "https://a/p/1".to_string(),
            last_modified: "2024-03-05T12:00:00Z".to_string(),
        }];
        write_summary(&manifest, dir.path()).await.unwrap();

        let written = std::fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        assert_eq!(
            written,
            "[\n  {\n    \"url\": \"https://a/p/1\",\n    \"lastModified\": \"2024-03-05T12:00:00Z\"\n  }\n]"
        );
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_summary(&[], &missing).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Io { .. }));
    }
}
