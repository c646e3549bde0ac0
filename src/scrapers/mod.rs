//! Sitemap discovery, page retrieval and article extraction.
//!
//! # Submodules
//!
//! | Module | Role |
//! |--------|------|
//! | [`sitemap`] | Reads the newsletter's `sitemap.xml` into an ordered URL list |
//! | [`http`] | Anonymous retrieval with `reqwest` (free posts) |
//! | [`browser`] | Retrieval through a logged-in Chrome session (paid posts) |
//! | [`extract`] | Narrows a page down to its article body |
//!
//! Both retrieval modes implement [`ContentFetcher`]. The mode is chosen once
//! at startup and the fetcher is handed to the pipeline, which never looks at
//! the mode again.

pub mod browser;
pub mod extract;
pub mod http;
pub mod sitemap;

use crate::error::Result;

/// A strategy for turning an article URL into raw page markup.
///
/// Implementations make exactly one attempt per call. Fetches take
/// `&mut self` because a browser session has a single current page.
pub trait ContentFetcher {
    /// Retrieve the page markup for `url`.
    async fn fetch(&mut self, url: &str) -> Result<String>;

    /// Tear down any resources held for the run.
    ///
    /// Called exactly once by the pipeline after the last fetch, whether the
    /// run succeeded or not.
    async fn release(&mut self) -> Result<()> {
        Ok(())
    }
}
