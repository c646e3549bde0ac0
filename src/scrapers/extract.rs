//! Article body extraction.
//!
//! Substack's post template wraps the readable body in
//! `<div class="available-content">`. For paywalled posts fetched without a
//! subscription the container is missing, and so is it on error pages; both
//! come back as `None` and the article is skipped.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.available-content").expect("valid selector"));

/// Return the outer HTML of the first article body container in `page`.
///
/// A container with nothing but whitespace inside counts as no content.
pub fn extract_article_html(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    document
        .select(&CONTENT_SELECTOR)
        .next()
        .filter(|element| !element.inner_html().trim().is_empty())
        .map(|element| element.html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_content_container() {
        let page = r#"<html><body>
            <div class="post-header"><h1>Title</h1></div>
            <div class="body markup available-content"><h2>Intro</h2><p>Hello</p></div>
            <div class="footer">subscribe</div>
        </body></html>"#;

        let html = extract_article_html(page).unwrap();
        assert!(html.starts_with("<div"));
        assert!(html.contains("<h2>Intro</h2><p>Hello</p>"));
        assert!(!html.contains("subscribe"));
        assert!(!html.contains("Title"));
    }

    #[test]
    fn test_first_container_wins() {
        let page = r#"<div class="available-content"><p>one</p></div>
            <div class="available-content"><p>two</p></div>"#;

        let html = extract_article_html(page).unwrap();
        assert!(html.contains("one"));
        assert!(!html.contains("two"));
    }

    #[test]
    fn test_missing_container_is_none() {
        let page = r#"<html><body><div class="paywall">Subscribe to read</div></body></html>"#;
        assert_eq!(extract_article_html(page), None);
    }

    #[test]
    fn test_empty_page_is_none() {
        assert_eq!(extract_article_html(""), None);
    }

    #[test]
    fn test_empty_container_is_none() {
        let page = r#"<html><body><div class="available-content">
        </div></body></html>"#;
        assert_eq!(extract_article_html(page), None);
    }

    #[test]
    fn test_marker_must_be_a_div() {
        let page = r#"<section class="available-content"><p>x</p></section>"#;
        assert_eq!(extract_article_html(page), None);
    }
}
