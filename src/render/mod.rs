// Rendering module.
// Turns repository records into HTML, either the built-in page or a user template.

pub mod content;
pub mod fragment;
pub mod page;
pub mod template;

pub use page::PageRenderer;
pub use template::TemplateRenderer;

use crate::error::Result;
use crate::record::RepositoryRecord;

/// A strategy for producing the output document from repository records.
pub trait Renderer {
    fn render(&self, repos: &[RepositoryRecord]) -> Result<String>;
}

/// Collapse whitespace between lines: trim every line and join with nothing.
pub fn minify(html: &str) -> String {
    html.trim().lines().map(str::trim).collect()
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
