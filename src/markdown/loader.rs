//! Background parser loading
//!
//! Building the highlighter's syntax and theme sets takes long enough to
//! stall the first frame, so the parser is prepared on a worker thread and
//! handed to the UI through a channel. The app polls once per frame and
//! shows a loading screen until the parser arrives.

use log::{debug, info, warn};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use super::parser::{ComrakParser, MarkdownParser};
use super::syntax::get_highlighter;

/// Handle to a parser being prepared in the background.
#[derive(Debug)]
pub struct ParserLoader {
    /// `None` once the parser has been received or the worker has gone away
    receiver: Option<Receiver<ComrakParser>>,
}

impl ParserLoader {
    /// Spawn the loader thread.
    pub fn spawn() -> Self {
        let (tx, rx) = channel();

        let spawned = thread::Builder::new()
            .name("parser-loader".to_string())
            .spawn(move || {
                let started = Instant::now();
                get_highlighter();

                let parser = ComrakParser::new();
                // Exercise the parser once before handing it over
                if let Err(e) = parser.parse("# warm up") {
                    warn!("Parser warm-up failed: {}", e);
                }

                debug!(
                    "Parser prepared with {:?} in {:?}",
                    parser.options(),
                    started.elapsed()
                );
                let _ = tx.send(parser);
            });

        match spawned {
            Ok(_) => Self { receiver: Some(rx) },
            Err(e) => {
                // No worker thread: prepare the parser on this thread instead
                warn!("Failed to spawn parser loader thread: {}", e);
                Self::ready(ComrakParser::new())
            }
        }
    }

    /// A loader whose parser is already available.
    pub fn ready(parser: ComrakParser) -> Self {
        let (tx, rx) = channel();
        let _ = tx.send(parser);
        Self { receiver: Some(rx) }
    }

    /// Take the parser if it has arrived. Non-blocking.
    ///
    /// Returns `Some` at most once.
    pub fn poll(&mut self) -> Option<ComrakParser> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(parser) => {
                info!("Markdown parser loaded");
                self.receiver = None;
                Some(parser)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("Parser loader exited without a parser; loading inline");
                self.receiver = None;
                Some(ComrakParser::new())
            }
        }
    }

    /// Whether the parser is still being prepared.
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for(loader: &mut ParserLoader) -> Option<ComrakParser> {
        let deadline = Instant::now() + Duration::from_secs(60);
        while Instant::now() < deadline {
            if let Some(parser) = loader.poll() {
                return Some(parser);
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_ready_loader_yields_once() {
        let mut loader = ParserLoader::ready(ComrakParser::new());
        assert!(loader.is_pending());
        assert!(loader.poll().is_some());
        assert!(!loader.is_pending());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_spawned_loader_delivers_parser() {
        let mut loader = ParserLoader::spawn();
        let parser = wait_for(&mut loader).expect("parser should arrive");
        assert_eq!(parser.parse("# Title").unwrap(), "<h1>Title</h1>\n");
        assert!(!loader.is_pending());
    }

    #[test]
    fn test_disconnected_worker_falls_back_to_inline_parser() {
        let (tx, rx) = channel::<ComrakParser>();
        drop(tx);
        let mut loader = ParserLoader { receiver: Some(rx) };
        assert!(loader.poll().is_some());
        assert!(loader.poll().is_none());
    }
}
