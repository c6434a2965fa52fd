//! Trimmed, non-empty line streams.
//!
//! Every stream the verifier touches (input, candidate, reference) is read
//! through a [`LineReader`]. Blank lines are skipped transparently, so no
//! caller ever observes them.

use std::io::BufRead;

use crate::error::{JudgeError, JudgeResult};

/// Pull-based source of trimmed, non-empty lines.
pub trait LineSource {
    /// Next non-empty line, or `None` once the stream is exhausted.
    ///
    /// Calling again after `None` keeps returning `None`.
    fn next_line(&mut self) -> JudgeResult<Option<String>>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn next_line(&mut self) -> JudgeResult<Option<String>> {
        (**self).next_line()
    }
}

/// [`LineSource`] over any buffered byte stream.
///
/// Bytes that are not valid UTF-8 are decoded lossily; the candidate controls
/// its output and must not be able to abort the run that way.
pub struct LineReader<R> {
    stream: &'static str,
    inner: R,
    buf: Vec<u8>,
    exhausted: bool,
}

impl<R: BufRead> LineReader<R> {
    /// `stream` names the stream in I/O error messages (e.g. `"candidate"`).
    pub fn new(stream: &'static str, inner: R) -> Self {
        Self {
            stream,
            inner,
            buf: Vec::new(),
            exhausted: false,
        }
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> JudgeResult<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }
        let stream = self.stream;
        loop {
            self.buf.clear();
            let read = self
                .inner
                .read_until(b'\n', &mut self.buf)
                .map_err(|source| JudgeError::Io { stream, source })?;
            if read == 0 {
                self.exhausted = true;
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.buf);
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn collect(text: &str) -> Vec<String> {
        let mut reader = LineReader::new("test", Cursor::new(text.as_bytes().to_vec()));
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().expect("read") {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn skips_blank_lines_and_trims() {
        let lines = collect("\n  3 \n\n\t\nCase #1:  5\r\n   \nlast");
        assert_eq!(lines, vec!["3", "Case #1:  5", "last"]);
    }

    #[test]
    fn end_of_stream_is_idempotent() {
        let mut reader = LineReader::new("test", Cursor::new(b"only\n".to_vec()));
        assert_eq!(reader.next_line().expect("read"), Some("only".to_string()));
        assert_eq!(reader.next_line().expect("read"), None);
        assert_eq!(reader.next_line().expect("read"), None);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut reader = LineReader::new("test", Cursor::new(vec![b'a', 0xff, b'\n']));
        let line = reader.next_line().expect("read").expect("line");
        assert!(line.starts_with('a'));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn io_errors_are_fatal_and_name_the_stream() {
        let mut reader = LineReader::new("reference", io::BufReader::new(Broken));
        let err = reader.next_line().expect_err("broken stream");
        assert!(err.to_string().contains("unreadable reference stream"));
    }
}
