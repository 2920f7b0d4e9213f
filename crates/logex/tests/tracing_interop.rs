//! Integration tests for events that reach a logger through `tracing`.
//!
//! Events from other `tracing` users share the logger's template and
//! threshold once its dispatcher is in scope.

use logex::{Level, Logger};
use test_support::{CaptureWriter, FixedTime, parse_line};

fn capture_logger(level: Level) -> (Logger, CaptureWriter) {
    let capture = CaptureWriter::new();
    let logger = Logger::builder()
        .level(level)
        .writer(capture.clone())
        .timer(FixedTime::default())
        .build();
    (logger, capture)
}

/// Verifies a foreign event uses its metadata for level and location.
#[test]
fn foreign_events_share_the_template() {
    let (logger, capture) = capture_logger(Level::Debug);

    let expected_line = line!() + 2;
    tracing::dispatcher::with_default(logger.dispatch(), || {
        tracing::warn!(peer = "10.0.0.1", "from tracing");
    });

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    let parsed = parse_line(&lines[0]).unwrap();
    assert_eq!(parsed.marker, "WARN");
    assert_eq!(parsed.caller, format!("tracing_interop.rs:{expected_line}"));
    assert_eq!(parsed.message, "from tracing");
    assert_eq!(parsed.fields, "peer=10.0.0.1");
}

/// Verifies foreign debug events get the debug marker.
#[test]
fn foreign_debug_events_use_debug_marker() {
    let (logger, capture) = capture_logger(Level::Debug);

    tracing::dispatcher::with_default(logger.dispatch(), || {
        tracing::debug!("fine grained");
    });

    assert_eq!(parse_line(&capture.lines()[0]).unwrap().marker, "DEBU");
}

/// Verifies the logger threshold also filters foreign events.
#[test]
fn foreign_events_respect_threshold() {
    let (logger, capture) = capture_logger(Level::Warn);

    tracing::dispatcher::with_default(logger.dispatch(), || {
        tracing::info!("suppressed");
        tracing::error!("kept");
    });
    logger.set_level(Level::Error);
    tracing::dispatcher::with_default(logger.dispatch(), || {
        tracing::warn!("suppressed after reload");
    });

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(parse_line(&lines[0]).unwrap().message, "kept");
}

/// Verifies foreign fields sharing a name with a facade column stay fields.
#[test]
fn foreign_fields_named_like_columns_are_kept() {
    let (logger, capture) = capture_logger(Level::Debug);

    tracing::dispatcher::with_default(logger.dispatch(), || {
        tracing::info!(file = "a.txt", line = 3, "opened");
    });

    let lines = capture.lines();
    let parsed = parse_line(&lines[0]).unwrap();
    assert!(parsed.caller.starts_with("tracing_interop.rs:"));
    assert_eq!(parsed.message, "opened");
    assert_eq!(parsed.fields, "file=a.txt line=3");
}

/// Verifies facade entries carry the reserved fields only as columns.
#[test]
fn facade_entries_do_not_leak_reserved_fields() {
    let (logger, capture) = capture_logger(Level::Debug);

    logger.with_field("attempt", 2).warn("retrying");

    let contents = capture.contents();
    assert!(!contents.contains("severity="));
    assert!(!contents.contains("file="));
    assert!(contents.trim_end().ends_with("attempt=2"));
}
