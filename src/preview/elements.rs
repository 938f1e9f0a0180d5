//! Preview element tree
//!
//! The preview pane does not embed a browser. Instead the normalized source
//! is parsed into comrak's AST and flattened into a small tree of blocks and
//! styled spans that the egui renderer can draw directly. Raw HTML blocks
//! are kept as their text content with the tags removed.

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{parse_document, Arena};
use regex::Regex;
use std::sync::OnceLock;

use crate::markdown::MarkdownOptions;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Inline formatting flags, inherited by nested inlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
    /// Target URL when the span is inside a link or is an image
    pub link: Option<String>,
}

impl Span {
    fn new(text: impl Into<String>, style: SpanStyle, link: Option<&str>) -> Self {
        Self {
            text: text.into(),
            style,
            link: link.map(str::to_string),
        }
    }

    fn line_break() -> Self {
        Self::new("\n", SpanStyle::default(), None)
    }

    /// Whether this span only marks a line break.
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}

/// Table column alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<TableAlignment> for Alignment {
    fn from(alignment: TableAlignment) -> Self {
        match alignment {
            TableAlignment::None => Alignment::None,
            TableAlignment::Left => Alignment::Left,
            TableAlignment::Center => Alignment::Center,
            TableAlignment::Right => Alignment::Right,
        }
    }
}

/// A list item: its blocks, plus the checkbox state for task items.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub checked: Option<bool>,
    pub blocks: Vec<PreviewElement>,
}

/// One block in the preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewElement {
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    Paragraph(Vec<Span>),
    CodeBlock {
        /// First word of the fence info string, possibly empty
        language: String,
        code: String,
    },
    BlockQuote(Vec<PreviewElement>),
    List {
        /// Starting number for ordered lists, `None` for bullets
        start: Option<usize>,
        items: Vec<ListItem>,
    },
    Table {
        alignments: Vec<Alignment>,
        header: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    ThematicBreak,
    /// Text content of a raw HTML block
    Html(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Building
// ─────────────────────────────────────────────────────────────────────────────

static HTML_TAG: OnceLock<Regex> = OnceLock::new();

fn html_tag() -> &'static Regex {
    HTML_TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Parse `source` with the converter's options and build the preview tree.
///
/// `source` should already be normalized; the tree mirrors what the HTML
/// output contains.
pub fn build_preview(source: &str) -> Vec<PreviewElement> {
    let arena = Arena::new();
    let options = MarkdownOptions::default().to_comrak_options();
    let root = parse_document(&arena, source, &options);
    blocks(root)
}

/// Convert the block children of `node`.
fn blocks<'a>(node: &'a AstNode<'a>) -> Vec<PreviewElement> {
    let mut out = Vec::new();
    for child in node.children() {
        push_block(child, &mut out);
    }
    out
}

fn push_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<PreviewElement>) {
    let ast = node.data.borrow();
    match &ast.value {
        NodeValue::Heading(heading) => out.push(PreviewElement::Heading {
            level: heading.level,
            spans: inlines(node),
        }),
        NodeValue::Paragraph => {
            let spans = inlines(node);
            // A paragraph of only inline tags has nothing to show
            if spans.iter().any(|s| !s.text.trim().is_empty()) {
                out.push(PreviewElement::Paragraph(spans));
            }
        }
        NodeValue::CodeBlock(code) => out.push(PreviewElement::CodeBlock {
            language: code
                .info
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
            code: code.literal.clone(),
        }),
        NodeValue::BlockQuote => out.push(PreviewElement::BlockQuote(blocks(node))),
        NodeValue::List(list) => {
            let start = match list.list_type {
                ListType::Bullet => None,
                ListType::Ordered => Some(list.start),
            };
            let items = node.children().map(list_item).collect();
            out.push(PreviewElement::List { start, items });
        }
        NodeValue::Table(table) => {
            let alignments = table.alignments.iter().map(|a| Alignment::from(*a)).collect();
            let mut header = Vec::new();
            let mut rows = Vec::new();
            for row in node.children() {
                let cells: Vec<Vec<Span>> = row.children().map(inlines).collect();
                match row.data.borrow().value {
                    NodeValue::TableRow(true) => header = cells,
                    _ => rows.push(cells),
                }
            }
            out.push(PreviewElement::Table {
                alignments,
                header,
                rows,
            });
        }
        NodeValue::ThematicBreak => out.push(PreviewElement::ThematicBreak),
        NodeValue::HtmlBlock(html) => {
            let text = strip_tags(&html.literal);
            if !text.is_empty() {
                out.push(PreviewElement::Html(text));
            }
        }
        // Containers we do not model (footnotes, front matter parents, ...)
        _ => {
            for child in node.children() {
                push_block(child, out);
            }
        }
    }
}

fn list_item<'a>(node: &'a AstNode<'a>) -> ListItem {
    let checked = match node.data.borrow().value {
        NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
        _ => None,
    };
    ListItem {
        checked,
        blocks: blocks(node),
    }
}

/// Flatten the inline children of `node` into spans.
fn inlines<'a>(node: &'a AstNode<'a>) -> Vec<Span> {
    let mut spans = Vec::new();
    for child in node.children() {
        push_inline(child, SpanStyle::default(), None, &mut spans);
    }
    spans
}

fn push_inline<'a>(
    node: &'a AstNode<'a>,
    style: SpanStyle,
    link: Option<&str>,
    out: &mut Vec<Span>,
) {
    let ast = node.data.borrow();
    match &ast.value {
        NodeValue::Text(text) => out.push(Span::new(text.as_str(), style, link)),
        NodeValue::Code(code) => out.push(Span::new(
            code.literal.as_str(),
            SpanStyle { code: true, ..style },
            link,
        )),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(Span::line_break()),
        // Inline tags are markup only; the text between them is kept
        NodeValue::HtmlInline(_) => {}
        NodeValue::Emph => children_inline(node, SpanStyle { emphasis: true, ..style }, link, out),
        NodeValue::Strong => children_inline(node, SpanStyle { strong: true, ..style }, link, out),
        NodeValue::Strikethrough => children_inline(
            node,
            SpanStyle {
                strikethrough: true,
                ..style
            },
            link,
            out,
        ),
        NodeValue::Link(target) => children_inline(node, style, Some(target.url.as_str()), out),
        NodeValue::Image(image) => {
            let mut alt = Vec::new();
            children_inline(node, style, None, &mut alt);
            let alt: String = alt.into_iter().map(|s| s.text).collect();
            out.push(Span::new(format!("🖼 {}", alt), style, Some(image.url.as_str())));
        }
        _ => children_inline(node, style, link, out),
    }
}

fn children_inline<'a>(
    node: &'a AstNode<'a>,
    style: SpanStyle,
    link: Option<&str>,
    out: &mut Vec<Span>,
) {
    for child in node.children() {
        push_inline(child, style, link, out);
    }
}

/// Remove tags from an HTML block, keeping non-blank trimmed lines.
fn strip_tags(html: &str) -> String {
    let text = html_tag().replace_all(html, "");
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn single(source: &str) -> PreviewElement {
        let mut elements = build_preview(source);
        assert_eq!(elements.len(), 1, "got: {elements:?}");
        elements.remove(0)
    }

    #[test]
    fn test_empty_source() {
        assert!(build_preview("").is_empty());
    }

    #[test]
    fn test_heading_levels() {
        let elements = build_preview("# One\n\n## Two\n\n###### Six");
        let levels: Vec<u8> = elements
            .iter()
            .filter_map(|e| match e {
                PreviewElement::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 6]);
    }

    #[test]
    fn test_paragraph_styles() {
        let PreviewElement::Paragraph(spans) = single("**b** *i* ~~s~~ `c`") else {
            panic!("expected paragraph");
        };
        let styled = |text: &str| spans.iter().find(|s| s.text == text).map(|s| s.style);
        assert!(styled("b").is_some_and(|s| s.strong));
        assert!(styled("i").is_some_and(|s| s.emphasis));
        assert!(styled("s").is_some_and(|s| s.strikethrough));
        assert!(styled("c").is_some_and(|s| s.code));
    }

    #[test]
    fn test_nested_styles_accumulate() {
        let PreviewElement::Paragraph(spans) = single("***both***") else {
            panic!("expected paragraph");
        };
        let both = spans.iter().find(|s| s.text == "both").unwrap();
        assert!(both.style.strong && both.style.emphasis);
    }

    #[test]
    fn test_link_span_carries_url() {
        let PreviewElement::Paragraph(spans) = single("see [Google](https://google.com)") else {
            panic!("expected paragraph");
        };
        let link = spans.iter().find(|s| s.text == "Google").unwrap();
        assert_eq!(link.link.as_deref(), Some("https://google.com"));
    }

    #[test]
    fn test_image_span() {
        let PreviewElement::Paragraph(spans) = single("![Logo](logo.png)") else {
            panic!("expected paragraph");
        };
        assert_eq!(spans[0].text, "🖼 Logo");
        assert_eq!(spans[0].link.as_deref(), Some("logo.png"));
    }

    #[test]
    fn test_soft_break_is_line_break() {
        let PreviewElement::Paragraph(spans) = single("a\nb") else {
            panic!("expected paragraph");
        };
        assert!(spans.iter().any(Span::is_line_break));
        assert_eq!(plain_text(&spans), "a\nb");
    }

    #[test]
    fn test_inline_html_tags_are_dropped() {
        let PreviewElement::Paragraph(spans) = single(r#"**Bold** and <span class="x">Y</span>"#)
        else {
            panic!("expected paragraph");
        };
        assert_eq!(plain_text(&spans), "Bold and Y");
    }

    #[test]
    fn test_bullet_and_ordered_lists() {
        let PreviewElement::List { start, items } = single("- a\n- b") else {
            panic!("expected list");
        };
        assert_eq!(start, None);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.checked.is_none()));

        let PreviewElement::List { start, items } = single("3. x\n4. y") else {
            panic!("expected list");
        };
        assert_eq!(start, Some(3));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_task_list_items() {
        let PreviewElement::List { items, .. } = single("- [x] done\n- [ ] todo") else {
            panic!("expected list");
        };
        let checked: Vec<Option<bool>> = items.iter().map(|i| i.checked).collect();
        assert_eq!(checked, vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_table() {
        let PreviewElement::Table {
            alignments,
            header,
            rows,
        } = single("| A | B |\n| :--- | ---: |\n| 1 | 2 |\n| 3 | 4 |")
        else {
            panic!("expected table");
        };
        assert_eq!(alignments, vec![Alignment::Left, Alignment::Right]);
        let header: Vec<String> = header.iter().map(|c| plain_text(c)).collect();
        assert_eq!(header, vec!["A", "B"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(plain_text(&rows[1][0]), "3");
    }

    #[test]
    fn test_code_block() {
        let element = single("```javascript title=x\nconst a = 1;\n```");
        assert_eq!(
            element,
            PreviewElement::CodeBlock {
                language: "javascript".to_string(),
                code: "const a = 1;\n".to_string(),
            }
        );
    }

    #[test]
    fn test_block_quote_and_rule() {
        let elements = build_preview("> quoted\n\n---");
        assert!(matches!(
            &elements[0],
            PreviewElement::BlockQuote(inner) if matches!(inner[0], PreviewElement::Paragraph(_))
        ));
        assert_eq!(elements[1], PreviewElement::ThematicBreak);
    }

    #[test]
    fn test_html_block_keeps_text_only() {
        let source = "<div class=\"x\">\n  <h3>Hi</h3>\n  <p>there</p>\n</div>\n";
        assert_eq!(single(source), PreviewElement::Html("Hi\nthere".to_string()));
    }

    #[test]
    fn test_tag_only_html_block_is_skipped() {
        assert!(build_preview("<div>\n</div>\n").is_empty());
    }
}
