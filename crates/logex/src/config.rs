//! crates/logex/src/config.rs
//! Logger configuration.

use std::io;

use is_terminal::IsTerminal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::format::DEFAULT_TIMESTAMP_FORMAT;
use crate::level::Level;

/// Standard stream that rendered lines are written to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Output {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

impl Output {
    /// Reports whether the stream is attached to a terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Stderr => io::stderr().is_terminal(),
            Self::Stdout => io::stdout().is_terminal(),
        }
    }

    pub(crate) fn make_writer(self) -> BoxMakeWriter {
        match self {
            Self::Stderr => BoxMakeWriter::new(io::stderr),
            Self::Stdout => BoxMakeWriter::new(io::stdout),
        }
    }
}

/// Settings used to build a [`Logger`](crate::Logger).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Minimum severity that is emitted.
    pub level: Level,
    /// Destination stream.
    pub output: Output,
    /// Whether to color the level marker. `None` enables colors when the
    /// destination is a terminal.
    pub ansi: Option<bool>,
    /// Whether entries are annotated with the caller's file and line.
    pub report_caller: bool,
    /// `chrono` strftime pattern for the timestamp column. A pattern that
    /// does not parse is replaced by the default one.
    pub timestamp_format: String,
    /// Whether [`init`](crate::init) also installs the logger as the global
    /// tracing dispatcher.
    pub install_global: bool,
}

impl LoggerConfig {
    /// Sets the minimum severity.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the destination stream.
    #[must_use]
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Forces colors on or off.
    #[must_use]
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = Some(ansi);
        self
    }

    /// Enables or disables caller annotation.
    #[must_use]
    pub fn report_caller(mut self, report_caller: bool) -> Self {
        self.report_caller = report_caller;
        self
    }

    /// Sets the timestamp pattern.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Controls whether [`init`](crate::init) installs a global dispatcher.
    #[must_use]
    pub fn install_global(mut self, install_global: bool) -> Self {
        self.install_global = install_global;
        self
    }

    /// Resolves the effective color setting for the configured stream.
    #[must_use]
    pub fn resolved_ansi(&self) -> bool {
        self.ansi.unwrap_or_else(|| self.output.is_terminal())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            output: Output::Stderr,
            ansi: None,
            report_caller: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
            install_global: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.output, Output::Stderr);
        assert!(config.report_caller);
        assert!(config.install_global);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn builder_methods_chain() {
        let config = LoggerConfig::default()
            .level(Level::Warn)
            .output(Output::Stdout)
            .ansi(false)
            .report_caller(false)
            .timestamp_format("%H:%M")
            .install_global(false);

        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.output, Output::Stdout);
        assert_eq!(config.ansi, Some(false));
        assert!(!config.report_caller);
        assert_eq!(config.timestamp_format, "%H:%M");
        assert!(!config.install_global);
    }

    #[test]
    fn explicit_ansi_wins_over_detection() {
        assert!(LoggerConfig::default().ansi(true).resolved_ansi());
        assert!(!LoggerConfig::default().ansi(false).resolved_ansi());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"level":"warn","output":"stdout"}"#).unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.output, Output::Stdout);
        assert!(config.report_caller);
    }
}
