//! JSX attribute normalization
//!
//! Embedded JSX blocks spell the HTML `class` attribute as `className`.
//! Before the source reaches the markdown parser, quoted `className`
//! attributes are rewritten to `class` so the HTML output is valid.
//!
//! This is a plain textual substitution, not a JSX parser: the pattern is
//! rewritten wherever it appears, including inside code spans and fenced
//! code blocks.

use std::borrow::Cow;

/// The JSX attribute name being rewritten.
const JSX_CLASS_ATTR: &str = "className";

/// Quoted attribute openings and their HTML replacements.
const REWRITES: [(&str, &str); 2] = [("className=\"", "class=\""), ("className='", "class='")];

/// Rewrite every `className="` / `className='` in `source` to
/// `class="` / `class='`.
///
/// Returns the input unchanged (borrowed) when it contains no `className`.
/// The function is total and idempotent.
pub fn normalize_attributes(source: &str) -> Cow<'_, str> {
    if !source.contains(JSX_CLASS_ATTR) {
        return Cow::Borrowed(source);
    }

    let mut output = Cow::Borrowed(source);
    for (from, to) in REWRITES {
        if output.contains(from) {
            output = Cow::Owned(output.replace(from, to));
        }
    }
    output
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quoted_attribute() {
        assert_eq!(
            normalize_attributes(r#"<div className="box">x</div>"#),
            r#"<div class="box">x</div>"#
        );
    }

    #[test]
    fn test_single_quoted_attribute() {
        assert_eq!(
            normalize_attributes("<span className='hint'>y</span>"),
            "<span class='hint'>y</span>"
        );
    }

    #[test]
    fn test_multiple_occurrences_on_one_line() {
        let input = r#"<h3 className="a">t</h3><p className='b'>u</p><i className="c"/>"#;
        let output = normalize_attributes(input);
        assert_eq!(
            output,
            r#"<h3 class="a">t</h3><p class='b'>u</p><i class="c"/>"#
        );
    }

    #[test]
    fn test_text_without_class_name_is_borrowed() {
        let input = "# Title\n\nNo JSX here.";
        let output = normalize_attributes(input);
        assert!(matches!(output, Cow::Borrowed(_)));
        assert_eq!(output, input);
    }

    #[test]
    fn test_bare_class_name_in_prose_is_kept() {
        let input = "Use the className prop, or className={styles.x}.";
        assert_eq!(normalize_attributes(input), input);
    }

    #[test]
    fn test_rewrites_inside_code_blocks_too() {
        let input = "```jsx\n<div className=\"x\" />\n```";
        assert_eq!(normalize_attributes(input), "```jsx\n<div class=\"x\" />\n```");
    }

    #[test]
    fn test_no_quoted_class_name_remains() {
        let inputs = [
            r#"<a className="1"><b className='2'></b></a>"#,
            "className=\"className=\"\"",
            "classNameclassName='",
            "",
        ];
        for input in inputs {
            let output = normalize_attributes(input);
            assert!(!output.contains("className=\""), "input: {input}");
            assert!(!output.contains("className='"), "input: {input}");
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            r#"**Bold** and <div className="x">Y</div>"#,
            "className='a' className=\"b\" className",
            "plain text",
        ];
        for input in inputs {
            let once = normalize_attributes(input).into_owned();
            let twice = normalize_attributes(&once).into_owned();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_unicode_is_preserved() {
        assert_eq!(
            normalize_attributes(r#"<h3 className="t">💡 JSX Component</h3>"#),
            r#"<h3 class="t">💡 JSX Component</h3>"#
        );
    }
}
