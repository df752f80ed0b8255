//! Markdown-to-plaintext stripping for fulltext indexing.
//!
//! A single event-stream pass over `pulldown-cmark`: text and code content
//! are kept, formatting, link targets, and raw HTML are dropped, and block
//! boundaries become newlines so the output stays readable as plain text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip Markdown formatting, returning the plain text content.
pub fn strip(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut out = String::new();
    let mut in_metadata = false;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => in_metadata = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_metadata = false,
            _ if in_metadata => {}
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::TableCell) => out.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableHead
                | TagEnd::TableRow,
            ) => block_break(&mut out),
            _ => {}
        }
    }

    while out.ends_with(['\n', ' ']) {
        out.pop();
    }
    out
}

/// Terminate the current block with a single newline.
fn block_break(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
