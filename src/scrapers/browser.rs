//! Retrieval through a logged-in browser session.
//!
//! Paid posts only render their full body for a subscriber, so in paid mode
//! every article is loaded in a real Chrome window the operator has signed
//! in to by hand. There is no credential-based login: [`ChromeSession::establish`]
//! opens the sign-in page and blocks until the operator confirms on stdin.
//!
//! The session has a single current page, so it is owned by one
//! [`BrowserFetcher`] and only ever driven sequentially.

use super::ContentFetcher;
use crate::error::{Result, ScrapeError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_SIGN_IN_URL: &str = "https://substack.com/sign-in";

/// A page-rendering session the pipeline can drive one URL at a time.
pub trait BrowserSession {
    /// Load `url` in the session's page.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Serialize the current DOM, including anything rendered client-side.
    async fn rendered_markup(&mut self) -> Result<String>;

    /// Close the session. Further calls are no-ops.
    async fn release(&mut self) -> Result<()>;
}

/// Options for launching the login browser.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Browser executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Page opened for the manual sign-in.
    pub sign_in_url: String,
    /// Upper bound on a single navigation.
    pub navigation_timeout: Duration,
}

/// A visible Chrome window driven over the DevTools protocol.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
    released: bool,
}

impl ChromeSession {
    /// Launch Chrome on the sign-in page and wait for the operator to log in.
    #[instrument(level = "info", skip_all, fields(sign_in_url = %options.sign_in_url))]
    pub async fn establish(options: &SessionOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder().with_head();
        if let Some(path) = &options.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScrapeError::BrowserConfig)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler event error");
                }
            }
        });

        let page = browser.new_page(options.sign_in_url.as_str()).await?;
        info!("Browser opened on sign-in page");

        println!(
            "Log in to your account in the browser window, then press Enter here to continue..."
        );
        wait_for_confirmation(&mut BufReader::new(tokio::io::stdin())).await?;
        info!("Login confirmed; continuing with scraping");

        Ok(Self {
            browser,
            page,
            handler,
            navigation_timeout: options.navigation_timeout,
            released: false,
        })
    }
}

impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        match timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(ScrapeError::NavigationTimeout {
                url: url.to_string(),
                timeout: self.navigation_timeout,
            }),
        }
    }

    async fn rendered_markup(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    #[instrument(level = "info", skip_all)]
    async fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Failed waiting for browser process to exit");
        }
        self.handler.abort();
        closed?;
        info!("Browser session closed");
        Ok(())
    }
}

/// Block until the operator enters a line on `input`.
///
/// End of input is an error: continuing would scrape without a login.
pub async fn wait_for_confirmation<R>(input: &mut R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = input.read_line(&mut line).await.map_err(ScrapeError::Prompt)?;
    if read == 0 {
        return Err(ScrapeError::Prompt(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed before login was confirmed",
        )));
    }
    Ok(())
}

/// Authenticated [`ContentFetcher`]: navigate, let the page settle, read it.
pub struct BrowserFetcher<S> {
    session: S,
    settle_delay: Duration,
}

impl<S: BrowserSession> BrowserFetcher<S> {
    pub fn new(session: S, settle_delay: Duration) -> Self {
        Self {
            session,
            settle_delay,
        }
    }
}

impl<S: BrowserSession> ContentFetcher for BrowserFetcher<S> {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&mut self, url: &str) -> Result<String> {
        self.session.navigate(url).await?;
        sleep(self.settle_delay).await;
        let markup = self.session.rendered_markup().await?;
        debug!(bytes = markup.len(), "Read rendered page");
        Ok(markup)
    }

    async fn release(&mut self) -> Result<()> {
        self.session.release().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every call; serves `<html>{url}</html>` for the current page.
    #[derive(Clone, Default)]
    pub(crate) struct FakeSession {
        pub calls: Arc<Mutex<Vec<String>>>,
        current: Option<String>,
    }

    impl BrowserSession for FakeSession {
        async fn navigate(&mut self, url: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("navigate {url}"));
            self.current = Some(url.to_string());
            Ok(())
        }

        async fn rendered_markup(&mut self) -> Result<String> {
            self.calls.lock().unwrap().push("read".to_string());
            Ok(format!(
                "<html>{}</html>",
                self.current.as_deref().unwrap_or_default()
            ))
        }

        async fn release(&mut self) -> Result<()> {
            self.calls.lock().unwrap().push("release".to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fetch_navigates_then_reads() {
        let session = FakeSession::default();
        let calls = Arc::clone(&session.calls);
        let mut fetcher = BrowserFetcher::new(session, Duration::ZERO);

        let markup = fetcher.fetch("https://a.substack.com/p/one").await.unwrap();
        assert_eq!(markup, "<html>https://a.substack.com/p/one</html>");
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["navigate https://a.substack.com/p/one", "read"]
        );
    }

    #[tokio::test]
    async fn test_fetch_waits_settle_delay() {
        let mut fetcher = BrowserFetcher::new(FakeSession::default(), Duration::from_millis(30));

        let started = std::time::Instant::now();
        fetcher.fetch("https://a.substack.com/p/one").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_release_forwards_to_session() {
        let session = FakeSession::default();
        let calls = Arc::clone(&session.calls);
        let mut fetcher = BrowserFetcher::new(session, Duration::ZERO);

        fetcher.release().await.unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["release"]);
    }

    #[tokio::test]
    async fn test_confirmation_reads_one_line() {
        let mut input: &[u8] = b"\nrest";
        wait_for_confirmation(&mut input).await.unwrap();
    }

    #[tokio::test]
    async fn test_confirmation_fails_on_closed_input() {
        let mut input: &[u8] = b"";
        let err = wait_for_confirmation(&mut input).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Prompt(_)));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome and an operator at the terminal
    async fn test_chrome_session_renders_page() {
        let options = SessionOptions {
            chrome_path: None,
            sign_in_url: "data:text/html,<p>sign in</p>".to_string(),
            navigation_timeout: Duration::from_secs(10),
        };
        let mut session = ChromeSession::establish(&options).await.unwrap();
        session
            .navigate("data:text/html,<div class=\"available-content\"><h2>Hi</h2></div>")
            .await
            .unwrap();
        let html = session.rendered_markup().await.unwrap();
        assert!(html.contains("available-content"));
        session.release().await.unwrap();
    }
}
