//! Escaping HTML renderer for the review document tree.
//!
//! Every text node, including raw HTML carried over from the input, is
//! escaped. The only markup not produced here is the span output of the
//! syntax highlighter for code blocks, which escapes the code it wraps.

use url::Url;

use super::code_highlight::CodeHighlighter;
use super::document::{Alignment, Block, Document, Inline, ListItem, Table, parse_document};

/// Renders review markup as HTML.
#[derive(Debug, Default)]
pub struct ReviewRenderer {
    highlighter: CodeHighlighter,
}

impl ReviewRenderer {
    /// Creates a renderer with a fresh highlighter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and renders review text.
    ///
    /// The same input always produces the same output.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        self.render_document(&parse_document(text))
    }

    /// Renders an already parsed document.
    #[must_use]
    pub fn render_document(&self, document: &Document) -> String {
        let mut output = String::new();
        self.write_blocks(&mut output, &document.blocks);
        output
    }

    fn write_blocks(&self, output: &mut String, blocks: &[Block]) {
        for block in blocks {
            self.write_block(output, block);
        }
    }

    fn write_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Paragraph(content) => {
                output.push_str("<p>");
                write_inlines(output, content);
                output.push_str("</p>\n");
            }
            Block::Plain(content) => {
                write_inlines(output, content);
                output.push('\n');
            }
            Block::Heading { level, content } => {
                let rank = (*level).clamp(1, 6);
                output.push_str(&format!("<h{rank}>"));
                write_inlines(output, content);
                output.push_str(&format!("</h{rank}>\n"));
            }
            Block::BlockQuote(children) => {
                output.push_str("<blockquote>\n");
                self.write_blocks(output, children);
                output.push_str("</blockquote>\n");
            }
            Block::List { start, items } => self.write_list(output, *start, items),
            Block::CodeBlock { language, code } => {
                output.push_str(&self.highlighter.highlight_or_plain(code, language.as_deref()));
            }
            Block::Table(table) => write_table(output, table),
            Block::Html(raw) => {
                output.push_str("<p>");
                output.push_str(&escape_html(raw.trim_end()));
                output.push_str("</p>\n");
            }
            Block::Rule => output.push_str("<hr />\n"),
        }
    }

    fn write_list(&self, output: &mut String, start: Option<u64>, items: &[ListItem]) {
        let tag = match start {
            Some(1) => {
                output.push_str("<ol>\n");
                "ol"
            }
            Some(first) => {
                output.push_str(&format!("<ol start=\"{first}\">\n"));
                "ol"
            }
            None => {
                output.push_str("<ul>\n");
                "ul"
            }
        };

        for item in items {
            output.push_str("<li>");
            match item.checked {
                Some(true) => {
                    output.push_str("<input type=\"checkbox\" disabled=\"\" checked=\"\" /> ");
                }
                Some(false) => output.push_str("<input type=\"checkbox\" disabled=\"\" /> "),
                None => {}
            }
            self.write_blocks(output, &item.blocks);
            output.push_str("</li>\n");
        }

        output.push_str(&format!("</{tag}>\n"));
    }
}

fn write_table(output: &mut String, table: &Table) {
    output.push_str("<table>\n<thead>\n<tr>\n");
    for (index, cell) in table.header.iter().enumerate() {
        write_cell(output, "th", alignment_at(table, index), cell);
    }
    output.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        output.push_str("<tr>\n");
        for (index, cell) in row.iter().enumerate() {
            write_cell(output, "td", alignment_at(table, index), cell);
        }
        output.push_str("</tr>\n");
    }
    output.push_str("</tbody>\n</table>\n");
}

fn alignment_at(table: &Table, index: usize) -> Alignment {
    table.alignments.get(index).copied().unwrap_or_default()
}

fn write_cell(output: &mut String, tag: &str, alignment: Alignment, content: &[Inline]) {
    let style = match alignment {
        Alignment::None => "",
        Alignment::Left => " style=\"text-align: left\"",
        Alignment::Center => " style=\"text-align: center\"",
        Alignment::Right => " style=\"text-align: right\"",
    };
    output.push_str(&format!("<{tag}{style}>"));
    write_inlines(output, content);
    output.push_str(&format!("</{tag}>\n"));
}

fn write_inlines(output: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        write_inline(output, inline);
    }
}

fn write_inline(output: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(text) | Inline::Html(text) => output.push_str(&escape_html(text)),
        Inline::Code(code) => {
            output.push_str("<code>");
            output.push_str(&escape_html(code));
            output.push_str("</code>");
        }
        Inline::Emphasis(content) => wrap_inlines(output, "em", content),
        Inline::Strong(content) => wrap_inlines(output, "strong", content),
        Inline::Strikethrough(content) => wrap_inlines(output, "del", content),
        Inline::Link {
            destination,
            title,
            content,
        } => {
            if !is_safe_destination(destination) {
                write_inlines(output, content);
                return;
            }
            output.push_str("<a href=\"");
            output.push_str(&escape_html(destination));
            output.push('"');
            if !title.is_empty() {
                output.push_str(" title=\"");
                output.push_str(&escape_html(title));
                output.push('"');
            }
            output.push('>');
            write_inlines(output, content);
            output.push_str("</a>");
        }
        Inline::Image {
            destination,
            title,
            alt,
        } => {
            let alt_text = plain_text(alt);
            if !is_safe_destination(destination) {
                output.push_str(&escape_html(&alt_text));
                return;
            }
            output.push_str("<img src=\"");
            output.push_str(&escape_html(destination));
            output.push_str("\" alt=\"");
            output.push_str(&escape_html(&alt_text));
            output.push('"');
            if !title.is_empty() {
                output.push_str(" title=\"");
                output.push_str(&escape_html(title));
                output.push('"');
            }
            output.push_str(" />");
        }
        Inline::SoftBreak => output.push('\n'),
        Inline::HardBreak => output.push_str("<br />\n"),
    }
}

fn wrap_inlines(output: &mut String, tag: &str, content: &[Inline]) {
    output.push_str(&format!("<{tag}>"));
    write_inlines(output, content);
    output.push_str(&format!("</{tag}>"));
}

fn plain_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(value) | Inline::Code(value) | Inline::Html(value) => {
                text.push_str(value);
            }
            Inline::Emphasis(content)
            | Inline::Strong(content)
            | Inline::Strikethrough(content)
            | Inline::Link { content, .. }
            | Inline::Image { alt: content, .. } => text.push_str(&plain_text(content)),
            Inline::SoftBreak | Inline::HardBreak => text.push(' '),
        }
    }
    text
}

/// Whether a link or image target may be emitted as an attribute.
///
/// Relative references and `http`, `https` and `mailto` URLs are allowed;
/// other schemes (such as `javascript:` or `data:`) are not.
#[must_use]
pub fn is_safe_destination(destination: &str) -> bool {
    match Url::parse(destination.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "mailto"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Escapes text for use in HTML content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
