//! crates/logex/src/logger.rs
//! The logger handle: threshold, backend dispatcher and the call shapes.

use std::fmt;

use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;

use crate::caller::Caller;
use crate::config::LoggerConfig;
use crate::entry::Entry;
use crate::fields::Fields;
use crate::format::{AscTime, CallerFormat, Timer};
use crate::level::{AtomicLevel, Level};
use crate::operand::{Values, sprint, sprintln};

/// Exit status used by the fatal and exit call shapes.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Target attached to every event the facade dispatches.
pub const TARGET: &str = "logex";

/// Leveled logger that annotates entries with their call site.
///
/// A `Logger` owns its own tracing dispatcher, so several loggers can coexist
/// in one process with different destinations and thresholds. The
/// process-wide instance behind the free functions is one of these.
///
/// All methods take `&self`; share a logger across threads by reference or
/// behind an [`Arc`](std::sync::Arc).
///
/// # Examples
///
/// ```
/// use logex::{Level, Logger, LoggerConfig};
///
/// let logger = Logger::new(LoggerConfig::default().level(Level::Warn).ansi(false));
/// assert!(!logger.is_enabled(Level::Info));
/// logger.warn("disk low");
/// ```
pub struct Logger {
    level: AtomicLevel,
    report_caller: bool,
    filter: reload::Handle<LevelFilter, Registry>,
    dispatch: Dispatch,
}

/// Builder for [`Logger`] values that need a custom writer or timer.
pub struct LoggerBuilder {
    config: LoggerConfig,
    writer: Option<BoxMakeWriter>,
    timer: Option<Timer>,
}

impl LoggerBuilder {
    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the initial threshold.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Enables or disables caller annotation.
    #[must_use]
    pub fn report_caller(mut self, report_caller: bool) -> Self {
        self.config.report_caller = report_caller;
        self
    }

    /// Forces colors on or off.
    #[must_use]
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.config.ansi = Some(ansi);
        self
    }

    /// Writes rendered lines to `writer` instead of the configured stream.
    ///
    /// Colors default to off for custom writers unless [`ansi`](Self::ansi)
    /// says otherwise.
    #[must_use]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Uses `timer` for the timestamp column instead of the configured
    /// pattern.
    #[must_use]
    pub fn timer<T>(mut self, timer: T) -> Self
    where
        T: FormatTime + Send + Sync + 'static,
    {
        self.timer = Some(Timer::new(timer));
        self
    }

    /// Builds the logger.
    #[must_use]
    pub fn build(self) -> Logger {
        let Self {
            config,
            writer,
            timer,
        } = self;

        let (ansi, writer) = match writer {
            Some(writer) => (config.ansi.unwrap_or(false), writer),
            None => (config.resolved_ansi(), config.output.make_writer()),
        };
        let timer =
            timer.unwrap_or_else(|| Timer::new(AscTime::new(config.timestamp_format.clone())));

        let (filter_layer, filter) = reload::Layer::new(config.level.as_level_filter());
        let fmt_layer = tracing_subscriber::fmt::layer()
            .event_format(CallerFormat::new(timer))
            .with_writer(writer)
            .with_ansi(ansi);
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer);

        Logger {
            level: AtomicLevel::new(config.level),
            report_caller: config.report_caller,
            filter,
            dispatch: Dispatch::new(subscriber),
        }
    }
}

macro_rules! level_methods {
    ($level:expr, $name:literal => $plain:ident, $formatted:ident, $line:ident) => {
        #[doc = concat!("Logs `values` at ", $name, " severity using the plain joining rules.")]
        #[track_caller]
        pub fn $plain(&self, values: impl Values) {
            self.log($level, values);
        }

        #[doc = concat!("Logs preformatted arguments at ", $name, " severity.")]
        #[track_caller]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.logf($level, args);
        }

        #[doc = concat!("Logs `values` at ", $name, " severity, space separated.")]
        #[track_caller]
        pub fn $line(&self, values: impl Values) {
            self.logln($level, values);
        }
    };
}

pub(crate) use level_methods;

impl Logger {
    /// Builds a logger writing to the stream named in `config`.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Starts a [`LoggerBuilder`] from the default configuration.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            config: LoggerConfig::default(),
            writer: None,
            timer: None,
        }
    }

    /// Returns the active threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level.load()
    }

    /// Changes the threshold.
    ///
    /// The new value is also pushed into the dispatcher's tracing filter, so
    /// when this logger is the global tracing default every other `tracing`
    /// user in the process sees the same threshold. Calls racing the update
    /// may observe either level.
    pub fn set_level(&self, level: Level) {
        self.level.store(level);
        // Reloading rebuilds tracing's interest cache against the current
        // default dispatcher, which must be this logger's own.
        tracing::dispatcher::with_default(&self.dispatch, || {
            // The handle only fails once the subscriber is gone, and `self` owns it.
            let _ = self.filter.reload(level.as_level_filter());
        });
    }

    /// Reports whether an entry at `level` would be emitted.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled_at(self.level())
    }

    /// Returns the tracing dispatcher entries are delivered to.
    #[must_use]
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Reports whether entries are annotated with their call site.
    #[must_use]
    pub fn reports_caller(&self) -> bool {
        self.report_caller
    }

    /// Logs `values` at `level` using the plain joining rules.
    #[track_caller]
    pub fn log(&self, level: Level, values: impl Values) {
        let caller = self.caller();
        self.emit_with(level, caller, &Fields::new(), || sprint(&values));
    }

    /// Logs preformatted arguments at `level`.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        let caller = self.caller();
        self.emit_with(level, caller, &Fields::new(), || args.to_string());
    }

    /// Logs `values` at `level`, always separating operands with a space.
    #[track_caller]
    pub fn logln(&self, level: Level, values: impl Values) {
        let caller = self.caller();
        self.emit_with(level, caller, &Fields::new(), || sprintln(&values));
    }

    level_methods!(Level::Debug, "debug" => debug, debugf, debugln);
    level_methods!(Level::Info, "info" => info, infof, infoln);
    level_methods!(Level::Warn, "warning" => warn, warnf, warnln);
    level_methods!(Level::Warn, "warning" => warning, warningf, warningln);
    level_methods!(Level::Error, "error" => error, errorf, errorln);

    /// Logs `values` at fatal severity and exits with [`FATAL_EXIT_CODE`].
    ///
    /// The process exits even when the threshold suppresses the entry.
    #[track_caller]
    pub fn fatal(&self, values: impl Values) -> ! {
        let caller = self.caller();
        self.emit_with(Level::Fatal, caller, &Fields::new(), || sprint(&values));
        exit_process()
    }

    /// Formatted variant of [`fatal`](Self::fatal).
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        let caller = self.caller();
        self.emit_with(Level::Fatal, caller, &Fields::new(), || args.to_string());
        exit_process()
    }

    /// Space-separated variant of [`fatal`](Self::fatal).
    #[track_caller]
    pub fn fatalln(&self, values: impl Values) -> ! {
        let caller = self.caller();
        self.emit_with(Level::Fatal, caller, &Fields::new(), || sprintln(&values));
        exit_process()
    }

    /// Logs `values` at panic severity, then panics with the rendered message
    /// as a `String` payload.
    ///
    /// Unlike [`fatal`](Self::fatal) the condition can be intercepted with
    /// [`std::panic::catch_unwind`].
    #[track_caller]
    pub fn panic(&self, values: impl Values) -> ! {
        let caller = self.caller();
        self.panic_with(caller, &Fields::new(), sprint(&values))
    }

    /// Formatted variant of [`panic`](Self::panic).
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let caller = self.caller();
        self.panic_with(caller, &Fields::new(), args.to_string())
    }

    /// Space-separated variant of [`panic`](Self::panic).
    #[track_caller]
    pub fn panicln(&self, values: impl Values) -> ! {
        let caller = self.caller();
        self.panic_with(caller, &Fields::new(), sprintln(&values))
    }

    /// Logs `values` at fatal severity without caller annotation and exits.
    pub fn exit(&self, values: impl Values) -> ! {
        self.emit_with(Level::Fatal, None, &Fields::new(), || sprint(&values));
        exit_process()
    }

    /// Space-separated variant of [`exit`](Self::exit).
    pub fn exitln(&self, values: impl Values) -> ! {
        self.emit_with(Level::Fatal, None, &Fields::new(), || sprintln(&values));
        exit_process()
    }

    /// Starts an entry carrying one field.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl fmt::Display) -> Entry<'_> {
        Entry::new(self, None, Fields::new()).with_field(key, value)
    }

    /// Starts an entry carrying every pair in `fields`.
    #[must_use]
    pub fn with_fields<I, K, V>(&self, fields: I) -> Entry<'_>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        Entry::new(self, None, fields.into_iter().collect())
    }

    /// Starts an entry carrying `error` under the `error` key.
    #[must_use]
    pub fn with_error<E>(&self, error: &E) -> Entry<'_>
    where
        E: std::error::Error + ?Sized,
    {
        Entry::new(self, None, Fields::new()).with_error(error)
    }

    /// Starts an entry annotated with the caller's location.
    ///
    /// With caller reporting disabled the entry is annotated as
    /// `unknown:0`. The verbosity argument is accepted for call-site
    /// compatibility and does not affect filtering.
    #[must_use]
    #[track_caller]
    pub fn v(&self, _verbosity: i32) -> Entry<'_> {
        let caller = if self.report_caller {
            Caller::capture()
        } else {
            Caller::new("unknown", 0)
        };
        Entry::new(self, Some(caller), Fields::new())
    }

    #[track_caller]
    fn caller(&self) -> Option<Caller> {
        if self.report_caller {
            Some(Caller::capture())
        } else {
            None
        }
    }

    /// Filters, renders and dispatches one entry. `render` only runs when
    /// `level` passes the threshold.
    pub(crate) fn emit_with(
        &self,
        level: Level,
        caller: Option<Caller>,
        fields: &Fields,
        render: impl FnOnce() -> String,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        self.dispatch_entry(level, caller, fields, &render());
    }

    #[track_caller]
    pub(crate) fn panic_with(&self, caller: Option<Caller>, fields: &Fields, message: String) -> ! {
        self.emit_with(Level::Panic, caller, fields, || message.clone());
        std::panic::panic_any(message)
    }

    fn dispatch_entry(&self, level: Level, caller: Option<Caller>, fields: &Fields, message: &str) {
        let rendered_fields = (!fields.is_empty()).then(|| fields.render());
        let fields = rendered_fields.as_deref();
        let file = caller.map(|caller| caller.file());
        let line = caller.map(|caller| caller.line());
        let severity = level.as_str();

        tracing::dispatcher::with_default(&self.dispatch, || match level {
            Level::Panic | Level::Fatal | Level::Error => tracing::event!(
                target: TARGET,
                tracing::Level::ERROR,
                severity,
                file,
                line,
                fields,
                "{message}"
            ),
            Level::Warn => tracing::event!(
                target: TARGET,
                tracing::Level::WARN,
                severity,
                file,
                line,
                fields,
                "{message}"
            ),
            Level::Info => tracing::event!(
                target: TARGET,
                tracing::Level::INFO,
                severity,
                file,
                line,
                fields,
                "{message}"
            ),
            Level::Debug => tracing::event!(
                target: TARGET,
                tracing::Level::DEBUG,
                severity,
                file,
                line,
                fields,
                "{message}"
            ),
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("report_caller", &self.report_caller)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

pub(crate) fn exit_process() -> ! {
    std::process::exit(FATAL_EXIT_CODE)
}
