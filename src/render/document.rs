//! Structural document tree for review markup.
//!
//! Review text is parsed with pulldown-cmark (CommonMark plus tables,
//! strikethrough and task lists) and folded into owned nodes. The tree
//! carries no HTML: raw HTML found in the input is kept as literal text in
//! [`Block::Html`] and [`Inline::Html`] nodes.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

/// A parsed review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level blocks in source order.
    pub blocks: Vec<Block>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Paragraph of inline content.
    Paragraph(Vec<Inline>),
    /// Inline content not wrapped in a paragraph (tight list items).
    Plain(Vec<Inline>),
    /// Heading with level 1 to 6.
    Heading {
        /// Heading level.
        level: u8,
        /// Heading text.
        content: Vec<Inline>,
    },
    /// Quoted blocks.
    BlockQuote(Vec<Block>),
    /// Ordered (`start` is set) or bullet list.
    List {
        /// First number of an ordered list.
        start: Option<u64>,
        /// List entries.
        items: Vec<ListItem>,
    },
    /// Fenced or indented code.
    CodeBlock {
        /// Language tag of a fenced block, if any.
        language: Option<String>,
        /// Literal code, including its trailing newline.
        code: String,
    },
    /// Table with a header row.
    Table(Table),
    /// Raw HTML from the input, kept as literal text.
    Html(String),
    /// Thematic break.
    Rule,
}

/// One entry of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Task-list state: `Some(true)` for `[x]`, `Some(false)` for `[ ]`.
    pub checked: Option<bool>,
    /// Item content.
    pub blocks: Vec<Block>,
}

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// No explicit alignment.
    #[default]
    None,
    /// Left aligned.
    Left,
    /// Centred.
    Center,
    /// Right aligned.
    Right,
}

/// Table content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Alignment per column.
    pub alignments: Vec<Alignment>,
    /// Header cells.
    pub header: Vec<Vec<Inline>>,
    /// Body rows of cells.
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Inline node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text.
    Text(String),
    /// Inline code span.
    Code(String),
    /// Emphasised content.
    Emphasis(Vec<Inline>),
    /// Strongly emphasised content.
    Strong(Vec<Inline>),
    /// Struck-through content.
    Strikethrough(Vec<Inline>),
    /// Hyperlink.
    Link {
        /// Link target as written.
        destination: String,
        /// Optional title.
        title: String,
        /// Link text.
        content: Vec<Inline>,
    },
    /// Image reference.
    Image {
        /// Image source as written.
        destination: String,
        /// Optional title.
        title: String,
        /// Alternative text.
        alt: Vec<Inline>,
    },
    /// Raw inline HTML from the input, kept as literal text.
    Html(String),
    /// Soft line break.
    SoftBreak,
    /// Hard line break.
    HardBreak,
}

/// Markup extensions recognised on top of CommonMark.
#[must_use]
pub fn markup_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parses review text into a [`Document`].
///
/// Parsing never fails; any input yields a tree.
#[must_use]
pub fn parse_document(text: &str) -> Document {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(text, markup_options()) {
        builder.handle(event);
    }
    builder.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FrameKind {
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List(Option<u64>),
    Item,
    CodeBlock(Option<String>),
    HtmlBlock,
    Table(Vec<Alignment>),
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { destination: String, title: String },
    Image { destination: String, title: String },
    Transparent,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    blocks: Vec<Block>,
    inlines: Vec<Inline>,
    text: String,
    items: Vec<ListItem>,
    cells: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    checked: Option<bool>,
}

impl Frame {
    const fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
            inlines: Vec::new(),
            text: String::new(),
            items: Vec::new(),
            cells: Vec::new(),
            rows: Vec::new(),
            checked: None,
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        if let Inline::Text(addition) = &inline {
            if let Some(Inline::Text(existing)) = self.inlines.last_mut() {
                existing.push_str(addition);
                return;
            }
        }
        self.inlines.push(inline);
    }

    fn flush_inlines(&mut self) {
        if !self.inlines.is_empty() {
            let pending = std::mem::take(&mut self.inlines);
            self.blocks.push(Block::Plain(pending));
        }
    }

    fn push_block(&mut self, block: Block) {
        self.flush_inlines();
        self.blocks.push(block);
    }

    fn into_blocks(mut self) -> Vec<Block> {
        self.flush_inlines();
        self.blocks
    }

    const fn collects_text(&self) -> bool {
        matches!(self.kind, FrameKind::CodeBlock(_) | FrameKind::HtmlBlock)
    }
}

struct TreeBuilder {
    root: Frame,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    const fn new() -> Self {
        Self {
            root: Frame::new(FrameKind::Root),
            stack: Vec::new(),
        }
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.stack.push(Frame::new(frame_kind(tag))),
            Event::End(_) => self.close_top(),
            Event::Text(text) => {
                let top = self.top();
                if top.collects_text() {
                    top.text.push_str(&text);
                } else {
                    top.push_inline(Inline::Text(text.into_string()));
                }
            }
            Event::Html(html) => {
                let top = self.top();
                if top.collects_text() {
                    top.text.push_str(&html);
                } else {
                    top.push_inline(Inline::Html(html.into_string()));
                }
            }
            Event::InlineHtml(html) => self.top().push_inline(Inline::Html(html.into_string())),
            Event::Code(code) => self.top().push_inline(Inline::Code(code.into_string())),
            Event::SoftBreak => self.top().push_inline(Inline::SoftBreak),
            Event::HardBreak => self.top().push_inline(Inline::HardBreak),
            Event::Rule => self.top().push_block(Block::Rule),
            Event::TaskListMarker(checked) => {
                if let Some(item) = self
                    .stack
                    .iter_mut()
                    .rev()
                    .find(|frame| frame.kind == FrameKind::Item)
                {
                    item.checked = Some(checked);
                }
            }
            _ => {}
        }
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.deliver(frame);
        }
    }

    fn deliver(&mut self, mut frame: Frame) {
        let kind = std::mem::replace(&mut frame.kind, FrameKind::Transparent);
        let parent = self.top();
        match kind {
            FrameKind::Root | FrameKind::Transparent => {
                for block in frame.blocks {
                    parent.push_block(block);
                }
                for inline in frame.inlines {
                    parent.push_inline(inline);
                }
            }
            FrameKind::Paragraph => parent.push_block(Block::Paragraph(frame.inlines)),
            FrameKind::Heading(level) => parent.push_block(Block::Heading {
                level,
                content: frame.inlines,
            }),
            FrameKind::BlockQuote => parent.push_block(Block::BlockQuote(frame.into_blocks())),
            FrameKind::List(start) => parent.push_block(Block::List {
                start,
                items: frame.items,
            }),
            FrameKind::Item => {
                let checked = frame.checked;
                parent.items.push(ListItem {
                    checked,
                    blocks: frame.into_blocks(),
                });
            }
            FrameKind::CodeBlock(language) => parent.push_block(Block::CodeBlock {
                language,
                code: frame.text,
            }),
            FrameKind::HtmlBlock => parent.push_block(Block::Html(frame.text)),
            FrameKind::Table(alignments) => {
                let mut rows = frame.rows.into_iter();
                let header = rows.next().unwrap_or_default();
                parent.push_block(Block::Table(Table {
                    alignments,
                    header,
                    rows: rows.collect(),
                }));
            }
            FrameKind::TableHead => {
                let header = if frame.cells.is_empty() {
                    frame.rows.into_iter().next().unwrap_or_default()
                } else {
                    frame.cells
                };
                parent.rows.insert(0, header);
            }
            FrameKind::TableRow => parent.rows.push(frame.cells),
            FrameKind::TableCell => parent.cells.push(frame.inlines),
            FrameKind::Emphasis => parent.push_inline(Inline::Emphasis(frame.inlines)),
            FrameKind::Strong => parent.push_inline(Inline::Strong(frame.inlines)),
            FrameKind::Strikethrough => parent.push_inline(Inline::Strikethrough(frame.inlines)),
            FrameKind::Link { destination, title } => parent.push_inline(Inline::Link {
                destination,
                title,
                content: frame.inlines,
            }),
            FrameKind::Image { destination, title } => parent.push_inline(Inline::Image {
                destination,
                title,
                alt: frame.inlines,
            }),
        }
    }

    fn finish(mut self) -> Document {
        while !self.stack.is_empty() {
            self.close_top();
        }
        Document {
            blocks: self.root.into_blocks(),
        }
    }
}

fn frame_kind(tag: Tag<'_>) -> FrameKind {
    match tag {
        Tag::Paragraph => FrameKind::Paragraph,
        Tag::Heading { level, .. } => FrameKind::Heading(heading_level(level)),
        Tag::BlockQuote(_) => FrameKind::BlockQuote,
        Tag::CodeBlock(kind) => FrameKind::CodeBlock(code_language(&kind)),
        Tag::HtmlBlock => FrameKind::HtmlBlock,
        Tag::List(start) => FrameKind::List(start),
        Tag::Item => FrameKind::Item,
        Tag::Table(alignments) => {
            FrameKind::Table(alignments.into_iter().map(Alignment::from).collect())
        }
        Tag::TableHead => FrameKind::TableHead,
        Tag::TableRow => FrameKind::TableRow,
        Tag::TableCell => FrameKind::TableCell,
        Tag::Emphasis => FrameKind::Emphasis,
        Tag::Strong => FrameKind::Strong,
        Tag::Strikethrough => FrameKind::Strikethrough,
        Tag::Link {
            dest_url, title, ..
        } => FrameKind::Link {
            destination: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => FrameKind::Image {
            destination: dest_url.into_string(),
            title: title.into_string(),
        },
        _ => FrameKind::Transparent,
    }
}

const fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// First word of a fenced block's info string.
fn code_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|character: char| character.is_whitespace() || character == ',')
            .next()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(ToOwned::to_owned),
        CodeBlockKind::Indented => None,
    }
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(value: pulldown_cmark::Alignment) -> Self {
        match value {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
