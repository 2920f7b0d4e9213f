#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logex` is a process-wide leveled logging facade. Every call annotates its
//! entry with the caller's file and line, filters it against one shared
//! threshold, and renders it with a single fixed template:
//!
//! ```text
//! WARN 2024-05-01 12:00:00,000       disk.rs:17 | disk low                                      attempt=2
//! ```
//!
//! # Design
//!
//! Rendering and writing are delegated to `tracing`. A [`Logger`] owns its own
//! [`tracing::Dispatch`] built from a reloadable level filter and a `fmt`
//! layer using [`CallerFormat`]. The facade keeps its own six-valued
//! [`Level`] threshold, checked before any formatting work, and mirrors it
//! into the reloadable filter so other `tracing` users sharing the dispatcher
//! observe the same threshold.
//!
//! Call sites are captured with `#[track_caller]`, so the recorded location is
//! always the code that called into the facade.
//!
//! Each severity offers three call shapes:
//!
//! - plain (`info(values)`): operands concatenated, with a space only between
//!   two adjacent non-string operands;
//! - formatted (`infof(format_args!(..))`, or the [`infof!`] macro);
//! - line (`infoln(values)`): operands always separated by a space.
//!
//! [`fatal()`] logs and exits with status 1. [`panic()`] logs and panics with the
//! rendered message, which a supervisor can intercept with
//! [`std::panic::catch_unwind`].
//!
//! # Examples
//!
//! ```
//! use logex::{Level, Logger, LoggerConfig};
//!
//! let logger = Logger::new(LoggerConfig::default().ansi(false));
//! logger.set_level(Level::Warn);
//! logger.info("suppressed");
//! logger.warn(("disk", " low: ", 93, "%"));
//! logger.errorf(format_args!("code={}", 42));
//! logger.with_field("attempt", 2).warnln(("retrying", "upload"));
//! ```
//!
//! The process-wide functions forward to a shared instance:
//!
//! ```
//! logex::set_level(logex::Level::Info);
//! logex::debug("suppressed");
//! logex::infof!("listening on {}", "127.0.0.1:8080");
//! ```

mod caller;
mod config;
mod entry;
mod error;
mod fields;
mod format;
mod global;
mod level;
mod logger;
mod macros;
mod operand;

pub use caller::Caller;
pub use config::{LoggerConfig, Output};
pub use entry::Entry;
pub use error::{InitError, ParseLevelError};
pub use fields::{ERROR_KEY, Fields};
pub use format::{AscTime, CallerFormat, DEFAULT_TIMESTAMP_FORMAT};
pub use global::{
    debug, debugf, debugln, error, errorf, errorln, exit, exitln, fatal, fatalf, fatalln, flush,
    flush_exit, info, infof, infoln, init, level, log_dir, logger, panic, panicf, panicln,
    serialize, serializef, set_level, v, warn, warnf, warning, warningf, warningln, warnln,
    with_error, with_field, with_fields,
};
pub use level::Level;
pub use logger::{FATAL_EXIT_CODE, Logger, LoggerBuilder, TARGET};
pub use operand::{Operand, Values, sprint, sprintln};
