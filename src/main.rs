//! # Substack Archiver
//!
//! Downloads every article listed in a Substack newsletter's sitemap and
//! saves each one twice: the article body as HTML, and a Markdown rendering
//! of it.
//!
//! ## Usage
//!
//! ```sh
//! substack_archiver https://example.substack.com -o ./archive
//! substack_archiver https://example.substack.com -o ./archive --paid
//! ```
//!
//! ## Architecture
//!
//! 1. **Login** (paid mode only): open a Chrome window on the sign-in page and
//!    wait for the operator to log in
//! 2. **Indexing**: read `sitemap.xml` into an ordered URL list
//! 3. **Archiving**: fetch each URL in turn, extract the article body, write
//!    it as `html/` and `md/` files
//! 4. **Output**: `urls.txt` and a `summary.json` manifest of archived posts
//!
//! Free posts are fetched with plain HTTP. Paid posts go through the logged-in
//! browser, which is closed when the run ends.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use pipeline::Pipeline;
use scrapers::browser::{BrowserFetcher, ChromeSession};
use scrapers::http::{build_client, HttpFetcher};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let client = build_client(args.timeout)?;
    let config = args.pipeline_config();
    let output_dir = config.output_dir.clone();
    let pipeline = Pipeline::new(config, client.clone());

    let summary = if args.paid {
        info!("Paid mode enabled; manual login required");
        let session = ChromeSession::establish(&args.session_options()).await?;
        let mut fetcher = BrowserFetcher::new(session, args.delay);
        pipeline.run(&mut fetcher).await?
    } else {
        info!("Scraping free content only");
        let mut fetcher = HttpFetcher::new(client);
        pipeline.run(&mut fetcher).await?
    };

    println!(
        "Saved {} of {} articles to {}",
        summary.processed,
        summary.discovered,
        output_dir.display()
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        discovered = summary.discovered,
        processed = summary.processed,
        skipped = summary.skipped(),
        "Execution complete"
    );

    Ok(())
}
