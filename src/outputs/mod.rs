//! Output formats and file writers.
//!
//! Every archived article is written once per [`OutputFormat`], each format
//! in its own directory under the output root:
//!
//! ```text
//! output/
//! ├── urls.txt          # every URL found in the sitemap
//! ├── summary.json      # the articles that were archived
//! ├── html/
//! │   └── 2024-03-05_my-article.html
//! └── md/
//!     └── 2024-03-05_my-article.md
//! ```
//!
//! # Submodules
//!
//! - [`paths`]: file naming for an article in a given format
//! - [`json`]: `summary.json` and `urls.txt`

pub mod json;
pub mod paths;

use html2md::{Handle, StructuredPrinter, TagHandler, TagHandlerFactory};
use std::collections::HashMap;

/// The representations each article is saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// The extracted article container, verbatim.
    Html,
    /// A lossy Markdown rendering with ATX (`#`) headings.
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Html, OutputFormat::Markdown];

    /// File extension, also used as the format's directory name.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
        }
    }

    /// Render extracted article HTML in this format.
    pub fn convert(self, article_html: &str) -> String {
        match self {
            OutputFormat::Html => article_html.to_string(),
            OutputFormat::Markdown => {
                html2md::parse_html_custom(article_html, &heading_handlers())
            }
        }
    }
}

/// Replacements for html2md's `h1`..`h6` handlers, which emit setext
/// underlines for h1/h2 and closing hashes for h3 and below.
fn heading_handlers() -> HashMap<String, Box<dyn TagHandlerFactory>> {
    let mut handlers: HashMap<String, Box<dyn TagHandlerFactory>> = HashMap::new();
    for level in 1..=6 {
        handlers.insert(
            format!("h{level}"),
            Box::new(move || HeadingHandler { level, start: 0 }),
        );
    }
    handlers
}

/// Writes one ATX heading line from whatever the heading's children printed.
///
/// Substack nests anchor `div`s and buttons inside headings and authors use
/// `<br>` in titles; all of that collapses into a single line of text.
struct HeadingHandler {
    level: usize,
    start: usize,
}

impl TagHandler for HeadingHandler {
    fn handle(&mut self, _tag: &Handle, printer: &mut StructuredPrinter) {
        printer.insert_newline();
        printer.insert_newline();
        self.start = printer.data.len();
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        let text = printer.data[self.start..]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        printer.data.truncate(self.start);

        if !text.is_empty() {
            printer.append_str(&"#".repeat(self.level));
            printer.append_str(" ");
            printer.append_str(&text);
        }
        printer.insert_newline();
        printer.insert_newline();
    }
}
