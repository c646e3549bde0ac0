//! Filesystem and logging helpers.

use crate::error::{Result, ScrapeError};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Create `path` and any missing parents.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| ScrapeError::io(path, e))
}

/// Delete `path` with everything in it, then recreate it empty.
///
/// A missing directory is not an error.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn reset_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => debug!("Removed previous output"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(ScrapeError::io(path, e)),
    }
    ensure_dir(path).await
}

/// Shorten `s` to at most `max` characters for log output.
///
/// Truncated strings get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("ééé", 2), "éé…(+2 bytes)");
    }

    #[tokio::test]
    async fn test_reset_dir_clears_contents() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("html");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.html"), "old").unwrap();

        reset_dir(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_reset_dir_creates_missing() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a/b/md");

        reset_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
    }
}
