//! Shared test utilities for the logex workspace.
//!
//! [`CaptureWriter`] collects rendered lines in memory and [`FixedTime`]
//! replaces the wall clock, so tests can assert on complete output lines.

use std::fmt::{self, Write as _};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Timestamp every [`FixedTime`] renders unless told otherwise.
pub const FIXED_TIMESTAMP: &str = "2024-05-01 12:00:00,000";

/// In-memory sink shared between a logger and the test observing it.
#[derive(Clone, Debug, Default)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the captured output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Timer that always renders the same text.
#[derive(Clone, Debug)]
pub struct FixedTime(pub &'static str);

impl Default for FixedTime {
    fn default() -> Self {
        Self(FIXED_TIMESTAMP)
    }
}

impl FormatTime for FixedTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.write_str(self.0)
    }
}

/// Splits a rendered line into `(marker, caller, message, fields)`.
///
/// Assumes the line was produced with [`FixedTime`] and no colors.
#[must_use]
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let (marker, rest) = line.split_once(' ')?;
    let rest = rest.strip_prefix(FIXED_TIMESTAMP)?.strip_prefix(' ')?;
    let (caller, rest) = rest.split_once(" | ")?;
    let (message, fields) = match rest.get(45..) {
        Some(tail) if tail.starts_with(' ') => (rest[..45].trim_end(), tail.trim_start()),
        _ => (rest.trim_end(), ""),
    };
    Some(ParsedLine {
        marker,
        caller: caller.trim_start(),
        message,
        fields,
    })
}

/// The columns of one rendered line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParsedLine<'a> {
    /// Four-character level marker.
    pub marker: &'a str,
    /// `file:line`, or empty when no caller was recorded.
    pub caller: &'a str,
    /// Message text with padding removed.
    pub message: &'a str,
    /// Field suffix, `key=value` pairs separated by spaces.
    pub fields: &'a str,
}
