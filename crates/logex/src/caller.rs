//! crates/logex/src/caller.rs
//! Source location of the code that invoked a logging call.

use std::fmt;
use std::panic::Location;

/// File and line of a logging call site.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    /// Captures the location of the first caller outside a `#[track_caller]`
    /// chain.
    ///
    /// Every public logging entry point is `#[track_caller]`, so the captured
    /// frame is the code that called the facade rather than the facade itself.
    #[must_use]
    #[track_caller]
    pub fn capture() -> Self {
        Self::from_location(Location::caller())
    }

    /// Builds a caller from an explicit [`Location`].
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    /// Builds a caller from raw parts.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Returns the full source path as recorded by the compiler.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the file name without its directories.
    #[must_use]
    pub fn basename(&self) -> &'static str {
        basename(self.file)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.basename(), self.line)
    }
}

/// Strips directories from a source path, accepting either separator.
pub(crate) fn basename(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn tracked() -> Caller {
        Caller::capture()
    }

    #[test]
    fn capture_reports_the_calling_line() {
        let expected_line = line!() + 1;
        let caller = tracked();

        assert_eq!(caller.line(), expected_line);
        assert_eq!(caller.basename(), "caller.rs");
    }

    #[test]
    fn display_uses_basename_and_line() {
        let caller = Caller::new("src/jobs/worker.rs", 42);
        assert_eq!(caller.to_string(), "worker.rs:42");
    }

    #[test]
    fn basename_handles_both_separators() {
        assert_eq!(basename("a/b/c.rs"), "c.rs");
        assert_eq!(basename(r"a\b\c.rs"), "c.rs");
        assert_eq!(basename("plain.rs"), "plain.rs");
    }

    #[test]
    fn from_location_copies_file_and_line() {
        let location = Location::caller();
        let caller = Caller::from_location(location);
        assert_eq!(caller.file(), location.file());
        assert_eq!(caller.line(), location.line());
    }
}
