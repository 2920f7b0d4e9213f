//! crates/logex/src/entry.rs
//! Entry builder returned by the field-attaching accessors.

use std::fmt;

use crate::caller::Caller;
use crate::fields::{ERROR_KEY, Fields};
use crate::level::Level;
use crate::logger::{Logger, exit_process, level_methods};
use crate::operand::{Values, sprint, sprintln};

/// A pending entry with structured fields attached.
///
/// Entries are built by [`Logger::with_field`], [`Logger::with_fields`],
/// [`Logger::with_error`] and [`Logger::v`], extended by chaining, and then
/// emitted at any level. Emitting does not consume the entry, so one set of
/// fields can back several calls.
///
/// # Examples
///
/// ```
/// use logex::{Logger, LoggerConfig};
///
/// let logger = Logger::new(LoggerConfig::default().ansi(false));
/// let entry = logger.with_field("job", "compact").with_field("attempt", 2);
/// entry.info("started");
/// entry.warnf(format_args!("retrying in {}s", 5));
/// ```
#[derive(Clone, Debug)]
pub struct Entry<'a> {
    logger: &'a Logger,
    caller: Option<Caller>,
    fields: Fields,
}

impl<'a> Entry<'a> {
    pub(crate) fn new(logger: &'a Logger, caller: Option<Caller>, fields: Fields) -> Self {
        Self {
            logger,
            caller,
            fields,
        }
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// Adds or replaces every pair in `fields`.
    #[must_use]
    pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        self.fields.extend(fields);
        self
    }

    /// Attaches `error` under the `error` key.
    #[must_use]
    pub fn with_error<E>(self, error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with_field(ERROR_KEY, error)
    }

    /// Returns the attached fields.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns the call site recorded by [`Logger::v`], if any.
    #[must_use]
    pub fn caller(&self) -> Option<Caller> {
        self.caller
    }

    /// Logs `values` at `level` using the plain joining rules.
    pub fn log(&self, level: Level, values: impl Values) {
        self.logger
            .emit_with(level, self.caller, &self.fields, || sprint(&values));
    }

    /// Logs preformatted arguments at `level`.
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger
            .emit_with(level, self.caller, &self.fields, || args.to_string());
    }

    /// Logs `values` at `level`, always separating operands with a space.
    pub fn logln(&self, level: Level, values: impl Values) {
        self.logger
            .emit_with(level, self.caller, &self.fields, || sprintln(&values));
    }

    level_methods!(Level::Debug, "debug" => debug, debugf, debugln);
    level_methods!(Level::Info, "info" => info, infof, infoln);
    level_methods!(Level::Warn, "warning" => warn, warnf, warnln);
    level_methods!(Level::Warn, "warning" => warning, warningf, warningln);
    level_methods!(Level::Error, "error" => error, errorf, errorln);

    /// Logs at fatal severity and exits the process.
    pub fn fatal(&self, values: impl Values) -> ! {
        self.log(Level::Fatal, values);
        exit_process()
    }

    /// Formatted variant of [`fatal`](Self::fatal).
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logf(Level::Fatal, args);
        exit_process()
    }

    /// Space-separated variant of [`fatal`](Self::fatal).
    pub fn fatalln(&self, values: impl Values) -> ! {
        self.logln(Level::Fatal, values);
        exit_process()
    }

    /// Logs at panic severity and panics with the rendered message.
    #[track_caller]
    pub fn panic(&self, values: impl Values) -> ! {
        self.logger
            .panic_with(self.caller, &self.fields, sprint(&values))
    }

    /// Formatted variant of [`panic`](Self::panic).
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger
            .panic_with(self.caller, &self.fields, args.to_string())
    }

    /// Space-separated variant of [`panic`](Self::panic).
    #[track_caller]
    pub fn panicln(&self, values: impl Values) -> ! {
        self.logger
            .panic_with(self.caller, &self.fields, sprintln(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn quiet() -> Logger {
        Logger::builder().writer(io::sink).build()
    }

    #[test]
    fn chained_fields_accumulate() {
        let logger = quiet();
        let entry = logger
            .with_field("a", 1)
            .with_fields([("b", "two"), ("c", "three")])
            .with_field("a", 10);

        assert_eq!(entry.fields().len(), 3);
        assert_eq!(entry.fields().get("a"), Some("10"));
        assert_eq!(entry.caller(), None);
    }

    #[test]
    fn with_error_uses_error_key() {
        let logger = quiet();
        let error = io::Error::new(io::ErrorKind::NotFound, "config missing");
        let entry = logger.with_error(&error);
        assert_eq!(entry.fields().get(ERROR_KEY), Some("config missing"));
    }

    #[test]
    fn v_records_the_call_site() {
        let logger = quiet();
        let expected_line = line!() + 1;
        let entry = logger.v(0);
        let caller = entry.caller().expect("caller reporting is on by default");
        assert_eq!(caller.line(), expected_line);
        assert_eq!(caller.basename(), "entry.rs");
    }
}
