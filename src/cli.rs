//! Command-line interface definitions.
//!
//! Every option except the newsletter URL and `--paid` can also be set
//! through an environment variable.

use crate::pipeline::PipelineConfig;
use crate::scrapers::browser::{SessionOptions, DEFAULT_SIGN_IN_URL};
use crate::scrapers::sitemap::sitemap_url;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the Substack archiver.
///
/// # Examples
///
/// ```sh
/// # Free posts into ./archive
/// substack_archiver https://example.substack.com -o ./archive
///
/// # Paid posts, logging in through a browser window first
/// substack_archiver https://example.substack.com --paid -d 1.5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the Substack newsletter
    pub url: String,

    /// Sitemap path relative to the newsletter URL
    #[arg(short, long, env = "SUBSTACK_SITEMAP", default_value = "sitemap.xml")]
    pub sitemap: String,

    /// Scrape paid content through a browser you log in to by hand
    #[arg(short, long)]
    pub paid: bool,

    /// Output folder for saved articles
    #[arg(short, long, env = "SUBSTACK_OUTPUT", default_value = ".")]
    pub output: PathBuf,

    /// Seconds to let each page render in paid mode
    #[arg(short, long, env = "SUBSTACK_DELAY", default_value = "0.3", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Per-request timeout in seconds
    #[arg(short, long, env = "SUBSTACK_TIMEOUT", default_value = "10", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Chrome or Chromium executable for paid mode (auto-detected if unset)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Page opened for the manual login in paid mode
    #[arg(long, default_value = DEFAULT_SIGN_IN_URL)]
    pub sign_in_url: String,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            sitemap_url: sitemap_url(&self.url, &self.sitemap),
            output_dir: self.output.clone(),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            chrome_path: self.chrome_path.clone(),
            sign_in_url: self.sign_in_url.clone(),
            navigation_timeout: self.timeout,
        }
    }
}

/// Seconds as a non-negative decimal, rejecting values a `Duration` can't hold.
fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("not a number: {e}"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("expected a non-negative number of seconds, got {s}"))
}
