//! HTML re-indentation
//!
//! The parser emits compact HTML. `format_html` breaks it into one node per
//! line and indents nested opening tags by two spaces, for the raw HTML view
//! and the exported `.html` file.
//!
//! The node classification is a pair of regular expressions, not an HTML
//! parser, and its output must stay byte-identical to what users already
//! have in exported files. Two consequences are kept on purpose:
//!
//! - any fragment that starts with a word character and does not end in `/`
//!   counts as an opening tag, so void elements written without the slash
//!   (`<br>`, `<hr>`) and bare text fragments indent what follows;
//! - a one-letter tag at the very start (`<a`, `<p`) never indents, because
//!   the opening pattern needs at least two characters after the `<`.

use regex::Regex;
use std::sync::OnceLock;

/// One level of indentation.
const INDENT_STEP: &str = "  ";

/// Line terminator emitted after every node.
const LINE_END: &str = "\r\n";

/// Boundary between two nodes: `>` then optional whitespace then `<`.
///
/// Whitespace here is the ECMAScript set the exported files were produced
/// with: Unicode white space plus U+FEFF, minus U+0085.
static NODE_BOUNDARY: OnceLock<Regex> = OnceLock::new();

/// A closing-tag fragment: `/` followed by a word character.
static CLOSING_TAG: OnceLock<Regex> = OnceLock::new();

/// An opening-tag fragment that is not self-closing.
static OPENING_TAG: OnceLock<Regex> = OnceLock::new();

fn node_boundary() -> &'static Regex {
    NODE_BOUNDARY.get_or_init(|| {
        Regex::new(r">[\s\x{FEFF}--\x{85}]*<").expect("node boundary pattern is valid")
    })
}

fn closing_tag() -> &'static Regex {
    // ASCII word characters only, matching the exported files' history
    CLOSING_TAG.get_or_init(|| Regex::new(r"^/[0-9A-Za-z_]").expect("closing pattern is valid"))
}

fn opening_tag() -> &'static Regex {
    OPENING_TAG.get_or_init(|| {
        Regex::new(r"^<?[0-9A-Za-z_][^>]*[^/]$").expect("opening pattern is valid")
    })
}

/// Whether `node` closes an element and should dedent before it is written.
fn is_closing(node: &str) -> bool {
    closing_tag().is_match(node)
}

/// Whether `node` opens an element and should indent what follows.
fn is_opening(node: &str) -> bool {
    opening_tag().is_match(node)
}

/// Re-indent compact HTML into one node per CRLF-terminated line.
///
/// The input is split at every `>\s*<`, each fragment is re-wrapped in
/// `<`…`>` at the current indent, and the wrapper characters that the first
/// and last fragments did not need are trimmed off the ends.
///
/// Pure and deterministic. Empty input yields an empty string.
pub fn format_html(html: &str) -> String {
    let mut formatted = String::with_capacity(html.len() + html.len() / 4 + 8);
    let mut indent = String::new();

    for node in node_boundary().split(html) {
        if is_closing(node) {
            let keep = indent.len().saturating_sub(INDENT_STEP.len());
            indent.truncate(keep);
        }

        formatted.push_str(&indent);
        formatted.push('<');
        formatted.push_str(node);
        formatted.push('>');
        formatted.push_str(LINE_END);

        if is_opening(node) {
            indent.push_str(INDENT_STEP);
        }
    }

    // The first line starts with a doubled `<` (the input's own plus the
    // wrapper) and the last ends with a doubled `>` followed by CRLF.
    let end = formatted.len().saturating_sub(1 + LINE_END.len());
    formatted.get(1..end).unwrap_or_default().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn indent_depth(line: &str) -> usize {
        line.len() - line.trim_start_matches(' ').len()
    }

    #[test]
    fn test_empty_input() {
        let output = format_html("");
        assert!(output.len() <= 3);
        assert_eq!(output, "");
    }

    #[test]
    fn test_three_nodes_one_letter_tags() {
        let output = format_html("<a><b>x</b></a>");
        let lines: Vec<&str> = output.split(LINE_END).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines, vec!["<a>", "<b>x</b>", "</a>"]);
        // Closing tag back at the outermost level
        assert_eq!(indent_depth(lines[2]), 0);
    }

    #[test]
    fn test_nested_elements_indent() {
        let output = format_html("<div><section><p>x</p></section></div>");
        assert_eq!(
            output,
            "<div>\r\n  <section>\r\n    <p>x</p>\r\n  </section>\r\n</div>"
        );
    }

    #[test]
    fn test_self_closing_tag_does_not_indent() {
        let output = format_html("<div><br/><span>x</span></div>");
        let lines: Vec<&str> = output.split(LINE_END).collect();
        assert_eq!(lines, vec!["<div>", "  <br/>", "  <span>x</span>", "</div>"]);
    }

    #[test]
    fn test_whitespace_between_tags_is_dropped() {
        let output = format_html("<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
        assert_eq!(
            output,
            "<ul>\r\n  <li>one</li>\r\n  <li>two</li>\r\n</ul>\n"
        );
    }

    #[test]
    fn test_byte_order_mark_between_tags_is_whitespace() {
        let output = format_html("<div>\u{a0}<p>x</p>\u{feff}</div>");
        assert_eq!(output, "<div>\r\n  <p>x</p>\r\n</div>");
    }

    #[test]
    fn test_next_line_between_tags_is_not_whitespace() {
        let html = "<a>\u{85}<b>";
        assert_eq!(format_html(html), html);
    }

    #[test]
    fn test_single_fragment_is_unchanged() {
        assert_eq!(format_html("<h1>Title</h1>\n"), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_parser_output_with_inline_html() {
        let html = "<p><strong>Bold</strong> and <div class=\"x\">Y</div></p>\n";
        let output = format_html(html);
        assert_eq!(
            output,
            "<p>\r\n<strong>Bold</strong> and <div class=\"x\">Y</div>\r\n</p>\n"
        );
    }

    #[test]
    fn test_void_tag_without_slash_counts_as_opening_tag() {
        let output = format_html("<div><br><span>x</span></div>");
        let lines: Vec<&str> = output.split(LINE_END).collect();
        assert_eq!(
            lines,
            vec!["<div>", "  <br>", "    <span>x</span>", "  </div>"]
        );
    }

    #[test]
    fn test_unmatched_opening_tag_leaves_indent_open() {
        let output = format_html("<section>\n<em>a</em>\n</section>");
        assert_eq!(output, "<section>\r\n  <em>a</em>\r\n</section>");

        let output = format_html("<div>\n<p>one</p>\n<custom-tag>\n</div>");
        let lines: Vec<&str> = output.split(LINE_END).collect();
        assert_eq!(lines[2], "  <custom-tag>");
        assert_eq!(lines[3], "  </div>");
    }

    #[test]
    fn test_dedent_never_underflows() {
        let output = format_html("</x></y></z>");
        for line in output.split(LINE_END) {
            assert_eq!(indent_depth(line), 0);
        }
    }

    #[test]
    fn test_unicode_content() {
        let output = format_html("<div><h3 class=\"t\">💡 JSX</h3></div>");
        assert_eq!(output, "<div>\r\n  <h3 class=\"t\">💡 JSX</h3>\r\n</div>");
    }

    #[test]
    fn test_deterministic() {
        let html = "<table><thead><tr><th>A</th></tr></thead></table>\n";
        assert_eq!(format_html(html), format_html(html));
    }

    #[test]
    fn test_non_html_input_does_not_panic() {
        for input in ["plain", ">", "<", "><", "a>b<c", "\r\n"] {
            let _ = format_html(input);
        }
    }
}
