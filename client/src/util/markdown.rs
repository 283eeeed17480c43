//! Markdown rendering for rich-text fields.
//!
//! Rich-text fields are edited as Markdown and submitted as HTML, the format
//! the mobile app renders. Raw HTML in the source passes through unchanged,
//! matching what editors could paste before.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{Options, Parser, html};

pub fn to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
