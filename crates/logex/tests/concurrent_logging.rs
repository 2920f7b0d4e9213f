//! Integration tests for logging from several threads at once.

use std::collections::BTreeSet;
use std::thread;

use logex::{Level, Logger};
use test_support::{CaptureWriter, FixedTime, parse_line};

const WORKERS: usize = 8;
const ENTRIES: usize = 200;

fn capture_logger() -> (Logger, CaptureWriter) {
    let capture = CaptureWriter::new();
    let logger = Logger::builder()
        .writer(capture.clone())
        .timer(FixedTime::default())
        .build();
    (logger, capture)
}

/// Verifies concurrent entries never interleave within a line.
#[test]
fn concurrent_entries_stay_whole() {
    let (logger, capture) = capture_logger();

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let logger = &logger;
            scope.spawn(move || {
                for entry in 0..ENTRIES {
                    logger
                        .with_field("worker", worker)
                        .infof(format_args!("worker {worker} entry {entry}"));
                }
            });
        }
    });

    let lines = capture.lines();
    assert_eq!(lines.len(), WORKERS * ENTRIES);

    let mut seen = BTreeSet::new();
    for line in &lines {
        let parsed = parse_line(line).unwrap_or_else(|| panic!("malformed line {line:?}"));
        assert_eq!(parsed.marker, "INFO");
        let worker = parsed
            .message
            .strip_prefix("worker ")
            .and_then(|rest| rest.split_once(' '))
            .map(|(worker, _)| worker)
            .expect("message names its worker");
        assert_eq!(parsed.fields, format!("worker={worker}"));
        assert!(seen.insert(parsed.message.to_owned()), "duplicate {line:?}");
    }
}

/// Verifies threshold changes from one thread are observed by others.
#[test]
fn threshold_changes_are_visible_across_threads() {
    let (logger, capture) = capture_logger();
    logger.set_level(Level::Error);

    thread::scope(|scope| {
        scope.spawn(|| logger.info("suppressed"));
    });
    assert!(capture.is_empty());

    logger.set_level(Level::Debug);
    thread::scope(|scope| {
        scope.spawn(|| logger.info("emitted"));
    });
    assert_eq!(capture.lines().len(), 1);
}
