//! crates/logex/src/global.rs
//! The process-wide logger and the free functions that forward to it.

use std::fmt;
use std::sync::OnceLock;

use crate::config::LoggerConfig;
use crate::entry::Entry;
use crate::error::InitError;
use crate::level::Level;
use crate::logger::Logger;
use crate::operand::Values;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process logger.
///
/// Must run before the first logging call; afterwards the lazily created
/// default logger is already in place and this returns
/// [`InitError::AlreadyInitialized`]. With
/// [`LoggerConfig::install_global`] set, the logger also becomes the global
/// tracing dispatcher, so entries from other `tracing` users share its
/// template and threshold.
pub fn init(config: LoggerConfig) -> Result<&'static Logger, InitError> {
    let install_global = config.install_global;
    let mut created = false;
    let logger = LOGGER.get_or_init(|| {
        created = true;
        Logger::new(config)
    });
    if !created {
        return Err(InitError::AlreadyInitialized);
    }
    if install_global {
        tracing::dispatcher::set_global_default(logger.dispatch().clone())?;
    }
    Ok(logger)
}

/// Returns the process logger, creating a default one on first use.
///
/// A logger created here is also offered as the global tracing dispatcher,
/// unless another subscriber already holds that slot.
pub fn logger() -> &'static Logger {
    if let Some(logger) = LOGGER.get() {
        return logger;
    }
    let config = LoggerConfig::default();
    let install_global = config.install_global;
    let mut created = false;
    let logger = LOGGER.get_or_init(|| {
        created = true;
        Logger::new(config)
    });
    if created && install_global {
        // Losing the slot to another subscriber only affects foreign events.
        let _ = tracing::dispatcher::set_global_default(logger.dispatch().clone());
    }
    logger
}

/// Changes the process-wide threshold.
pub fn set_level(level: Level) {
    logger().set_level(level);
}

/// Returns the process-wide threshold.
pub fn level() -> Level {
    logger().level()
}

/// Directory callers may use for log files.
pub const fn log_dir() -> &'static str {
    "/tmp/"
}

macro_rules! level_functions {
    ($name:literal => $plain:ident, $formatted:ident, $line:ident) => {
        #[doc = concat!("Logs `values` at ", $name, " severity on the process logger.")]
        #[track_caller]
        pub fn $plain(values: impl Values) {
            logger().$plain(values);
        }

        #[doc = concat!("Logs preformatted arguments at ", $name, " severity on the process logger.")]
        #[track_caller]
        pub fn $formatted(args: fmt::Arguments<'_>) {
            logger().$formatted(args);
        }

        #[doc = concat!("Logs space-separated `values` at ", $name, " severity on the process logger.")]
        #[track_caller]
        pub fn $line(values: impl Values) {
            logger().$line(values);
        }
    };
}

level_functions!("debug" => debug, debugf, debugln);
level_functions!("info" => info, infof, infoln);
level_functions!("warning" => warn, warnf, warnln);
level_functions!("warning" => warning, warningf, warningln);
level_functions!("error" => error, errorf, errorln);

/// Logs at fatal severity on the process logger, then exits with status 1.
#[track_caller]
pub fn fatal(values: impl Values) -> ! {
    logger().fatal(values)
}

/// Formatted variant of [`fatal()`].
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    logger().fatalf(args)
}

/// Space-separated variant of [`fatal()`].
#[track_caller]
pub fn fatalln(values: impl Values) -> ! {
    logger().fatalln(values)
}

/// Logs at panic severity on the process logger, then panics with the
/// rendered message.
#[track_caller]
pub fn panic(values: impl Values) -> ! {
    logger().panic(values)
}

/// Formatted variant of [`panic()`].
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    logger().panicf(args)
}

/// Space-separated variant of [`panic()`].
#[track_caller]
pub fn panicln(values: impl Values) -> ! {
    logger().panicln(values)
}

/// Logs at fatal severity without caller annotation, then exits.
pub fn exit(values: impl Values) -> ! {
    logger().exit(values)
}

/// Space-separated variant of [`exit`].
pub fn exitln(values: impl Values) -> ! {
    logger().exitln(values)
}

/// Starts an entry on the process logger carrying one field.
pub fn with_field(key: impl Into<String>, value: impl fmt::Display) -> Entry<'static> {
    logger().with_field(key, value)
}

/// Starts an entry on the process logger carrying every pair in `fields`.
pub fn with_fields<I, K, V>(fields: I) -> Entry<'static>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: fmt::Display,
{
    logger().with_fields(fields)
}

/// Starts an entry on the process logger carrying `error`.
pub fn with_error<E>(error: &E) -> Entry<'static>
where
    E: std::error::Error + ?Sized,
{
    logger().with_error(error)
}

/// Starts an entry on the process logger annotated with the call site.
#[track_caller]
pub fn v(verbosity: i32) -> Entry<'static> {
    logger().v(verbosity)
}

/// Does nothing.
pub fn serialize(_values: impl Values) {}

/// Does nothing.
pub fn serializef(_args: fmt::Arguments<'_>) {}

/// Does nothing; entries are written synchronously.
pub fn flush() {}

/// Does nothing; entries are written synchronously.
pub fn flush_exit() {}
