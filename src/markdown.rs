//! Analysis text to HTML.

use crate::view::html_escape;

/// Whether this build renders Markdown or falls back to preformatted text.
pub const fn is_available() -> bool {
    cfg!(feature = "markdown")
}

/// Escaped text inside a wrapping `<pre>`, keeping line breaks.
pub fn preformatted(text: &str) -> String {
    format!(
        "<pre style=\"white-space: pre-wrap; word-wrap: break-word;\">{}</pre>",
        html_escape(text)
    )
}

/// Renders Markdown with GitHub extensions. Single newlines become `<br />`
/// and raw HTML in the source is shown as text.
#[cfg(feature = "markdown")]
pub fn to_html(text: &str) -> String {
    use pulldown_cmark::{html, Event, Options, Parser};

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(not(feature = "markdown"))]
pub fn to_html(text: &str) -> String {
    tracing::debug!("markdown feature disabled, using preformatted text");
    preformatted(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preformatted_escapes() {
        let html = preformatted("a < b\nc > d");
        assert!(html.starts_with("<pre"));
        assert!(html.contains("a &lt; b\nc &gt; d"));
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_markdown_with_line_breaks() {
        let html = to_html("## Summary\nline one\nline two");
        assert!(html.contains("<h2>Summary</h2>"));
        assert!(html.contains("line one<br />"));
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_markdown_tables_and_strikethrough() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_raw_html_is_escaped() {
        let html = to_html("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[cfg(not(feature = "markdown"))]
    #[test]
    fn test_fallback_without_markdown() {
        assert!(!is_available());
        assert!(to_html("# title").starts_with("<pre"));
    }
}
