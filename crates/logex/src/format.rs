//! crates/logex/src/format.rs
//! The fixed line template applied to every rendered entry.
//!
//! ```text
//! {short} {timestamp} {caller:>18} | {message:<45}{fields}\n
//! ```
//!
//! `caller` is `basename(file):line`, built from the `file` and `line` fields
//! of the event, which are consumed rather than repeated in the field suffix.

use std::fmt::{self, Write as _};

use chrono::format::{Item, StrftimeItems};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::caller::basename;
use crate::fields::push_pair;
use crate::level::Level;
use crate::logger::TARGET;

/// Default `chrono` pattern for the timestamp column.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

const CALLER_WIDTH: usize = 18;
const MESSAGE_WIDTH: usize = 45;

/// Local wall-clock timestamp rendered with a `chrono` strftime pattern.
#[derive(Clone, Debug)]
pub struct AscTime {
    format: String,
}

impl AscTime {
    /// Creates a timer using the given strftime pattern.
    ///
    /// A pattern `chrono` cannot parse is replaced by
    /// [`DEFAULT_TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        let format = format.into();
        if is_valid_pattern(&format) {
            Self { format }
        } else {
            Self::default()
        }
    }
}

fn is_valid_pattern(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

impl Default for AscTime {
    fn default() -> Self {
        Self {
            format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}

impl FormatTime for AscTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format(&self.format))
    }
}

/// Type-erased timestamp source.
pub(crate) struct Timer(Box<dyn FormatTime + Send + Sync>);

impl Timer {
    pub(crate) fn new<T>(timer: T) -> Self
    where
        T: FormatTime + Send + Sync + 'static,
    {
        Self(Box::new(timer))
    }
}

impl FormatTime for Timer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        self.0.format_time(w)
    }
}

/// Event formatter producing the fixed logex line layout.
pub struct CallerFormat {
    timer: Timer,
}

impl CallerFormat {
    pub(crate) const fn new(timer: Timer) -> Self {
        Self { timer }
    }
}

impl fmt::Debug for CallerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallerFormat").finish_non_exhaustive()
    }
}

impl<S, N> FormatEvent<S, N> for CallerFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut visitor = EntryVisitor::new(metadata.target() == TARGET);
        event.record(&mut visitor);

        // Events from other crates carry neither a severity nor explicit
        // location fields; fall back to what tracing knows about them.
        let foreign = visitor.severity.is_none();
        let level = visitor
            .severity
            .unwrap_or_else(|| Level::from_tracing(metadata.level()));
        let caller = match (visitor.file.as_deref(), visitor.line) {
            (Some(file), Some(line)) => Some((file, line)),
            _ if foreign => metadata.file().zip(metadata.line().map(u64::from)),
            _ => None,
        };

        // A failing timer costs the timestamp, never the entry.
        let mut timestamp = String::new();
        if self.timer.format_time(&mut Writer::new(&mut timestamp)).is_err() {
            timestamp.clear();
        }

        visitor.fields.push_str(&visitor.extra);
        let line = Line {
            level,
            timestamp: &timestamp,
            caller,
            message: &visitor.message,
            fields: &visitor.fields,
            ansi: writer.has_ansi_escapes(),
        };
        write!(writer, "{line}")
    }
}

/// One fully resolved output line.
pub(crate) struct Line<'a> {
    pub(crate) level: Level,
    pub(crate) timestamp: &'a str,
    pub(crate) caller: Option<(&'a str, u64)>,
    pub(crate) message: &'a str,
    pub(crate) fields: &'a str,
    pub(crate) ansi: bool,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ansi {
            write!(
                f,
                "{}{}\x1b[0m",
                level_color(self.level),
                self.level.short_name()
            )?;
        } else {
            f.write_str(self.level.short_name())?;
        }

        let caller = self
            .caller
            .map(|(file, line)| format!("{}:{line}", basename(file)))
            .unwrap_or_default();
        let message = self.message.trim_end_matches(['\n', '\r']);

        writeln!(
            f,
            " {} {caller:>CALLER_WIDTH$} | {message:<MESSAGE_WIDTH$}{}",
            self.timestamp, self.fields
        )
    }
}

const fn level_color(level: Level) -> &'static str {
    match level {
        Level::Debug => "\x1b[37m",
        Level::Info => "\x1b[36m",
        Level::Warn => "\x1b[33m",
        Level::Error | Level::Fatal | Level::Panic => "\x1b[31m",
    }
}

#[derive(Default)]
struct EntryVisitor {
    /// Whether `severity`, `file`, `line` and `fields` are facade columns
    /// rather than user fields.
    reserved: bool,
    message: String,
    severity: Option<Level>,
    file: Option<String>,
    line: Option<u64>,
    fields: String,
    extra: String,
}

impl EntryVisitor {
    fn new(reserved: bool) -> Self {
        Self {
            reserved,
            ..Self::default()
        }
    }

    fn record_text(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "severity" if self.reserved => self.severity = value.parse().ok(),
            "file" if self.reserved => self.file = Some(value),
            "line" if self.reserved => self.line = value.parse().ok(),
            "fields" if self.reserved => self.fields = value,
            _ => push_pair(&mut self.extra, name, &value),
        }
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field.name(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_text(field.name(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(caller: Option<(&str, u64)>, message: &str, fields: &str) -> String {
        Line {
            level: Level::Warn,
            timestamp: "2024-05-01 12:00:00,000",
            caller,
            message,
            fields,
            ansi: false,
        }
        .to_string()
    }

    #[test]
    fn renders_fixed_template() {
        let rendered = line(Some(("src/storage/disk.rs", 17)), "disk low", "");
        let expected = format!(
            "WARN 2024-05-01 12:00:00,000 {:>18} | {:<45}\n",
            "disk.rs:17", "disk low"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn missing_caller_leaves_blank_column() {
        let rendered = line(None, "no location", "");
        assert!(rendered.starts_with(&format!("WARN 2024-05-01 12:00:00,000 {} | ", " ".repeat(18))));
    }

    #[test]
    fn long_messages_are_not_truncated() {
        let message = "x".repeat(60);
        let rendered = line(Some(("a.rs", 1)), &message, " k=v");
        assert!(rendered.ends_with(&format!("| {message} k=v\n")));
    }

    #[test]
    fn fields_follow_padded_message() {
        let rendered = line(Some(("a.rs", 1)), "short", " attempt=2");
        assert!(rendered.ends_with(&format!("| {:<45} attempt=2\n", "short")));
    }

    #[test]
    fn trailing_newlines_do_not_split_the_line() {
        let rendered = line(Some(("a.rs", 1)), "with newline\n", "");
        assert_eq!(rendered.matches('\n').count(), 1);
    }

    #[test]
    fn ansi_colors_only_the_level_marker() {
        let rendered = Line {
            level: Level::Error,
            timestamp: "t",
            caller: None,
            message: "m",
            fields: "",
            ansi: true,
        }
        .to_string();
        assert!(rendered.starts_with("\x1b[31mERRO\x1b[0m t "));
    }

    #[test]
    fn foreign_visitor_keeps_reserved_names_as_fields() {
        let mut visitor = EntryVisitor::new(false);
        visitor.record_text("file", "a.txt".to_owned());
        visitor.record_text("line", "3".to_owned());
        visitor.record_text("severity", "fatal".to_owned());
        assert_eq!(visitor.file, None);
        assert_eq!(visitor.line, None);
        assert_eq!(visitor.severity, None);
        assert_eq!(visitor.extra, " file=a.txt line=3 severity=fatal");
    }

    #[test]
    fn invalid_pattern_falls_back_to_default() {
        assert_eq!(AscTime::new("%Y-%Q").format, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(AscTime::new("%H:%M").format, "%H:%M");

        let mut out = String::new();
        AscTime::new("%Y-%Q")
            .format_time(&mut Writer::new(&mut out))
            .unwrap();
        assert_eq!(out.len(), "2024-05-01 12:00:00,000".len());
    }

    #[test]
    fn asc_time_uses_pattern() {
        let mut out = String::new();
        AscTime::new("fixed").format_time(&mut Writer::new(&mut out)).unwrap();
        assert_eq!(out, "fixed");
    }

    #[test]
    fn visitor_routes_reserved_names() {
        let mut visitor = EntryVisitor::new(true);
        visitor.record_text("severity", "fatal".to_owned());
        visitor.record_text("file", "src/main.rs".to_owned());
        visitor.record_text("line", "9".to_owned());
        visitor.record_text("peer", "10.0.0.1".to_owned());
        assert_eq!(visitor.severity, Some(Level::Fatal));
        assert_eq!(visitor.file.as_deref(), Some("src/main.rs"));
        assert_eq!(visitor.line, Some(9));
        assert_eq!(visitor.extra, " peer=10.0.0.1");
    }
}
