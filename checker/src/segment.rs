//! Splitting candidate and reference output into `Case #<n>:` windows.
//!
//! A segmenter owns one stream and keeps at most one line of lookahead: the
//! header that ended the previous window. It never decides severity; the
//! verifier turns a bad header into a fatal fault (reference) or a recorded
//! diagnostic (candidate).

use tracing::trace;

use crate::core::header::{header_index, is_header_line, strip_case_header};
use crate::core::types::CaseContext;
use crate::error::JudgeResult;
use crate::io::lines::LineSource;

/// Result of asking for the next case window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Lines of the case, header prefix removed.
    Window(Vec<String>),
    /// The stream ended where a header was expected.
    MissingHeader,
    /// The next line is not the header of the expected case.
    IncorrectHeader { found: String },
}

/// Case window reader over one output stream.
pub struct CaseSegmenter<S> {
    source: S,
    pending: Option<String>,
}

impl<S: LineSource> CaseSegmenter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    /// Header line carried over from the previous call, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Look ahead one line; true if the stream holds anything further.
    ///
    /// The line read stays pending, so this does not consume output.
    pub fn has_remaining(&mut self) -> JudgeResult<bool> {
        if self.pending.is_none() {
            self.pending = self.source.next_line()?;
        }
        Ok(self.pending.is_some())
    }

    /// Read the window of case `ctx.index`.
    ///
    /// On [`Segment::IncorrectHeader`] the stream is resynchronized: a header
    /// naming a later case stays pending so that case can still match, while
    /// any other offending line is dropped together with the lines after it.
    pub fn next_window(&mut self, ctx: CaseContext) -> JudgeResult<Segment> {
        let line = match self.pending.take() {
            Some(line) => line,
            None => match self.source.next_line()? {
                Some(line) => line,
                None => return Ok(Segment::MissingHeader),
            },
        };

        let Some(rest) = strip_case_header(&line, ctx.index).map(str::to_string) else {
            match header_index(&line) {
                Some(index) if index > ctx.index => self.pending = Some(line.clone()),
                _ => self.read_body(&mut Vec::new())?,
            }
            return Ok(Segment::IncorrectHeader { found: line });
        };

        let mut window = Vec::new();
        if !rest.is_empty() {
            window.push(rest);
        }
        self.read_body(&mut window)?;
        trace!(case = ctx.index, lines = window.len(), "window read");
        Ok(Segment::Window(window))
    }

    /// Collect lines up to the next header, leaving that header pending.
    fn read_body(&mut self, window: &mut Vec<String>) -> JudgeResult<()> {
        while let Some(line) = self.source.next_line()? {
            if is_header_line(&line) {
                self.pending = Some(line);
                return Ok(());
            }
            window.push(line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines, window};

    #[test]
    fn keeps_next_header_as_lookahead() {
        let mut segmenter = CaseSegmenter::new(lines("Case #1: 5\nCase #2: 7\n"));
        let first = segmenter.next_window(CaseContext::new(1)).expect("read");
        assert_eq!(first, Segment::Window(window(&["5"])));
        assert_eq!(segmenter.pending(), Some("Case #2: 7"));
    }

    #[test]
    fn multi_line_windows_and_empty_header_remainder() {
        let text = "Case #1:\n1 2\n\n3 4\nCase #2: x\ny\n";
        let mut segmenter = CaseSegmenter::new(lines(text));
        assert_eq!(
            segmenter.next_window(CaseContext::new(1)).expect("read"),
            Segment::Window(window(&["1 2", "3 4"]))
        );
        assert_eq!(
            segmenter.next_window(CaseContext::new(2)).expect("read"),
            Segment::Window(window(&["x", "y"]))
        );
        assert_eq!(segmenter.pending(), None);
        assert_eq!(
            segmenter.next_window(CaseContext::new(3)).expect("read"),
            Segment::MissingHeader
        );
    }

    #[test]
    fn empty_stream_is_missing_header() {
        let mut segmenter = CaseSegmenter::new(lines("\n\n"));
        assert_eq!(
            segmenter.next_window(CaseContext::new(1)).expect("read"),
            Segment::MissingHeader
        );
    }

    #[test]
    fn skipped_case_header_stays_pending() {
        let mut segmenter = CaseSegmenter::new(lines("Case #1: a\nCase #3: c\n"));
        segmenter.next_window(CaseContext::new(1)).expect("read");
        assert_eq!(
            segmenter.next_window(CaseContext::new(2)).expect("read"),
            Segment::IncorrectHeader {
                found: "Case #3: c".to_string()
            }
        );
        assert_eq!(
            segmenter.next_window(CaseContext::new(3)).expect("read"),
            Segment::Window(window(&["c"]))
        );
    }

    #[test]
    fn lookahead_for_trailing_data_keeps_the_line() {
        let mut segmenter = CaseSegmenter::new(lines("Case #1: a\n"));
        segmenter.next_window(CaseContext::new(1)).expect("read");
        assert!(!segmenter.has_remaining().expect("peek"));

        let mut segmenter = CaseSegmenter::new(lines("Case #1: a\nCase #2: b\n"));
        segmenter.next_window(CaseContext::new(1)).expect("read");
        assert!(segmenter.has_remaining().expect("peek"));
        assert!(segmenter.has_remaining().expect("peek"));
        assert_eq!(segmenter.pending(), Some("Case #2: b"));
    }

    #[test]
    fn garbage_line_is_dropped_with_its_body() {
        let mut segmenter = CaseSegmenter::new(lines("debug output\nmore\nCase #2: b\n"));
        assert_eq!(
            segmenter.next_window(CaseContext::new(1)).expect("read"),
            Segment::IncorrectHeader {
                found: "debug output".to_string()
            }
        );
        assert_eq!(
            segmenter.next_window(CaseContext::new(2)).expect("read"),
            Segment::Window(window(&["b"]))
        );
    }
}
