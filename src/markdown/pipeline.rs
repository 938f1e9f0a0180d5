//! Conversion pipeline
//!
//! Owns the editor's source text and the derived HTML. Every source change
//! runs normalize, parse and reformat once, as long as a parser has been
//! attached. Failures are recorded as a message and never clear the last
//! good output.

use log::{debug, info, warn};

use super::normalize::normalize_attributes;
use super::parser::{ComrakParser, MarkdownParser};
use super::reformat::format_html;

/// Parser lifecycle. The pipeline only runs once a parser is `Ready`.
#[derive(Debug)]
enum ParserState<P> {
    NotReady,
    Ready(P),
}

/// Source text and the HTML derived from it.
#[derive(Debug)]
pub struct Pipeline<P: MarkdownParser = ComrakParser> {
    parser: ParserState<P>,
    /// Current editor text
    source: String,
    /// Reformatted HTML from the last successful run
    output: String,
    /// Parser output from the last successful run, before reformatting
    raw_html: String,
    /// Message from the last failed run, cleared on success
    error: Option<String>,
    /// Number of runs attempted, successful or not
    run_count: u64,
}

impl<P: MarkdownParser> Default for Pipeline<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MarkdownParser> Pipeline<P> {
    /// Create an empty pipeline with no parser attached.
    pub fn new() -> Self {
        Self {
            parser: ParserState::NotReady,
            source: String::new(),
            output: String::new(),
            raw_html: String::new(),
            error: None,
            run_count: 0,
        }
    }

    /// Replace the source text and re-run if a parser is attached.
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.run();
    }

    /// Attach (or replace) the parser and run immediately.
    pub fn attach_parser(&mut self, parser: P) {
        if matches!(self.parser, ParserState::NotReady) {
            info!("Markdown parser ready");
        } else {
            debug!("Markdown parser replaced");
        }
        self.parser = ParserState::Ready(parser);
        self.run();
    }

    /// Run normalize, parse and reformat over the current source.
    ///
    /// Does nothing while no parser is attached. On failure the previous
    /// output is kept and the error message is stored.
    pub fn run(&mut self) {
        let ParserState::Ready(parser) = &self.parser else {
            return;
        };

        self.run_count += 1;
        let normalized = normalize_attributes(&self.source);

        match parser.parse(&normalized) {
            Ok(html) => {
                self.output = format_html(&html);
                self.raw_html = html;
                self.error = None;
            }
            Err(e) => {
                warn!("Conversion failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Current source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Reformatted HTML from the last successful run.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Parser output from the last successful run, before reformatting.
    pub fn raw_html(&self) -> &str {
        &self.raw_html
    }

    /// Error message from the last run, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a parser has been attached.
    pub fn is_ready(&self) -> bool {
        matches!(self.parser, ParserState::Ready(_))
    }

    pub fn run_count(&self) -> u64 {
        self.run_count
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fails whenever the input contains `FAIL`, otherwise defers to comrak.
    struct FlakyParser;

    impl MarkdownParser for FlakyParser {
        fn parse(&self, text: &str) -> Result<String> {
            if text.contains("FAIL") {
                Err(Error::Conversion("unexpected token".to_string()))
            } else {
                ComrakParser::new().parse(text)
            }
        }
    }

    /// Counts calls and echoes its input.
    struct CountingParser(Arc<AtomicUsize>);

    impl MarkdownParser for CountingParser {
        fn parse(&self, text: &str) -> Result<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_string())
        }
    }

    #[test]
    fn test_new_pipeline_is_empty() {
        let pipeline: Pipeline = Pipeline::new();
        assert!(!pipeline.is_ready());
        assert_eq!(pipeline.source(), "");
        assert_eq!(pipeline.output(), "");
        assert!(pipeline.error().is_none());
        assert_eq!(pipeline.run_count(), 0);
    }

    #[test]
    fn test_set_source_before_ready_never_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = Pipeline::new();
        pipeline.set_source("# One");
        pipeline.set_source("# Two");
        pipeline.run();

        assert_eq!(pipeline.source(), "# Two");
        assert_eq!(pipeline.output(), "");
        assert_eq!(pipeline.run_count(), 0);

        pipeline.attach_parser(CountingParser(Arc::clone(&calls)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.output(), "# Two");
    }

    #[test]
    fn test_heading_output() {
        let mut pipeline = Pipeline::new();
        pipeline.attach_parser(ComrakParser::new());
        pipeline.set_source("# Title");

        assert!(pipeline.is_ready());
        assert!(pipeline.output().contains("<h1>Title</h1>"));
        assert!(pipeline.error().is_none());
    }

    #[test]
    fn test_one_run_per_source_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = Pipeline::new();
        pipeline.attach_parser(CountingParser(Arc::clone(&calls)));

        for text in ["a", "ab", "ab", "abc"] {
            pipeline.set_source(text);
        }

        // One run on attach, then one per set_source, duplicates included
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(pipeline.run_count(), 5);
    }

    #[test]
    fn test_failure_keeps_previous_output() {
        let mut pipeline = Pipeline::new();
        pipeline.attach_parser(FlakyParser);
        pipeline.set_source("# Good");
        let good = pipeline.output().to_string();
        assert!(good.contains("<h1>Good</h1>"));

        pipeline.set_source("# FAIL");
        assert_eq!(pipeline.output(), good);
        assert_eq!(pipeline.error(), Some("unexpected token"));
        assert_eq!(pipeline.source(), "# FAIL");

        pipeline.set_source("# Fixed");
        assert!(pipeline.error().is_none());
        assert!(pipeline.output().contains("<h1>Fixed</h1>"));
    }

    #[test]
    fn test_failure_on_first_run_leaves_output_empty() {
        let mut pipeline = Pipeline::new();
        pipeline.set_source("FAIL");
        pipeline.attach_parser(FlakyParser);

        assert_eq!(pipeline.output(), "");
        assert_eq!(pipeline.error(), Some("unexpected token"));
    }

    #[test]
    fn test_end_to_end_jsx_class_name() {
        let mut pipeline = Pipeline::new();
        pipeline.attach_parser(ComrakParser::new());
        pipeline.set_source(r#"**Bold** and <div className="x">Y</div>"#);

        let raw = pipeline.raw_html();
        assert!(raw.contains(r#"<strong>Bold</strong> and <div class="x">Y</div>"#));
        assert!(!raw.contains("className"));
        assert_eq!(pipeline.output(), format_html(raw));
        assert!(!pipeline.output().contains("className"));
    }

    #[test]
    fn test_normalized_text_reaches_parser() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = Pipeline::new();
        pipeline.attach_parser(CountingParser(calls));
        pipeline.set_source("<span className='a'>t</span>");

        assert_eq!(pipeline.raw_html(), "<span class='a'>t</span>");
        // The stored source is untouched
        assert_eq!(pipeline.source(), "<span className='a'>t</span>");
    }

    #[test]
    fn test_reattach_replaces_parser_and_reruns() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut pipeline = Pipeline::new();
        pipeline.set_source("x");
        pipeline.attach_parser(CountingParser(Arc::clone(&first)));
        pipeline.attach_parser(CountingParser(Arc::clone(&second)));
        pipeline.set_source("y");

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_source() {
        let mut pipeline = Pipeline::new();
        pipeline.attach_parser(ComrakParser::new());
        pipeline.set_source("");
        assert_eq!(pipeline.output(), "");
        assert!(pipeline.error().is_none());
    }
}
