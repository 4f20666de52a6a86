//! # Narrative Sink
//!
//! Append-only trace of a design run, injected into every calculation that
//! wants to explain itself. The sink is an observability side channel: every
//! design function must produce identical numeric results whether it writes
//! to a real sink or to [`NullNarrative`].
//!
//! Write failures are swallowed on purpose - a full disk must not turn a
//! valid design into an error.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::narrative::{BufferNarrative, Narrative};
//!
//! let mut log = BufferNarrative::new();
//! log.note("Net allowable soil pressure = 2.525 ksf");
//! assert_eq!(log.lines().len(), 1);
//! ```

use std::io::Write;

/// Append-only text sink for a human-readable derivation trace.
pub trait Narrative {
    /// Append one line to the trace.
    fn note(&mut self, line: &str);
}

/// Discards every line. Use when no trace is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNarrative;

impl Narrative for NullNarrative {
    fn note(&mut self, _line: &str) {}
}

/// Collects lines in memory. Used by tests and by callers that want to
/// post-process the trace.
#[derive(Debug, Default, Clone)]
pub struct BufferNarrative {
    lines: Vec<String>,
}

impl BufferNarrative {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines appended so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole trace as one newline-joined string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Narrative for BufferNarrative {
    fn note(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Streams lines to any [`std::io::Write`] implementor (typically the
/// per-request `.txt` log file opened by the batch driver).
#[derive(Debug)]
pub struct WriterNarrative<W: Write> {
    writer: W,
}

impl<W: Write> WriterNarrative<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Hand the underlying writer back (e.g., to flush or close it).
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Narrative for WriterNarrative<W> {
    fn note(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_collects_lines() {
        let mut log = BufferNarrative::new();
        log.note("first");
        log.note("second");
        assert_eq!(log.lines(), &["first".to_string(), "second".to_string()]);
        assert_eq!(log.text(), "first\nsecond");
    }

    #[test]
    fn test_null_is_silent() {
        let mut log = NullNarrative;
        log.note("goes nowhere");
    }

    #[test]
    fn test_writer_appends_newlines() {
        let mut log = WriterNarrative::new(Vec::new());
        log.note("alpha");
        log.note("beta");
        let bytes = log.into_inner();
        assert_eq!(String::from_utf8(bytes).unwrap(), "alpha\nbeta\n");
    }
}
