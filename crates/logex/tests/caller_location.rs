//! Integration tests for call-site annotation.
//!
//! Every entry records the file and line of the code that called into the
//! logger, never a location inside the logger itself.

use logex::{Caller, Logger};
use test_support::{CaptureWriter, FixedTime, parse_line};

const THIS_FILE: &str = "caller_location.rs";

fn capture_logger(report_caller: bool) -> (Logger, CaptureWriter) {
    let capture = CaptureWriter::new();
    let logger = Logger::builder()
        .report_caller(report_caller)
        .writer(capture.clone())
        .timer(FixedTime::default())
        .build();
    (logger, capture)
}

fn only_caller(capture: &CaptureWriter) -> String {
    let lines = capture.lines();
    assert_eq!(lines.len(), 1, "expected one line, got {lines:?}");
    parse_line(&lines[0]).unwrap().caller.to_owned()
}

/// Verifies the plain shape records this file and line.
#[test]
fn plain_shape_records_call_site() {
    let (logger, capture) = capture_logger(true);

    let expected_line = line!() + 1;
    logger.info("hello");

    assert_eq!(only_caller(&capture), format!("{THIS_FILE}:{expected_line}"));
}

/// Verifies the formatted and line shapes record their own call sites.
#[test]
fn formatted_and_line_shapes_record_call_site() {
    let (logger, capture) = capture_logger(true);

    let formatted_line = line!() + 1;
    logger.errorf(format_args!("code={}", 42));
    let ln_line = line!() + 1;
    logger.warnln(("a", "b"));

    let callers: Vec<String> = capture
        .lines()
        .iter()
        .map(|line| parse_line(line).unwrap().caller.to_owned())
        .collect();
    assert_eq!(
        callers,
        vec![
            format!("{THIS_FILE}:{formatted_line}"),
            format!("{THIS_FILE}:{ln_line}"),
        ]
    );
}

/// Verifies a helper marked `#[track_caller]` forwards its own caller.
#[test]
fn track_caller_helpers_are_transparent() {
    #[track_caller]
    fn log_through(logger: &Logger) {
        logger.info("through helper");
    }

    let (logger, capture) = capture_logger(true);

    let expected_line = line!() + 1;
    log_through(&logger);

    assert_eq!(only_caller(&capture), format!("{THIS_FILE}:{expected_line}"));
}

/// Verifies the caller column is right aligned to 18 characters.
#[test]
fn caller_column_is_right_aligned() {
    let (logger, capture) = capture_logger(true);

    let expected_line = line!() + 1;
    logger.info("aligned");

    let caller = format!("{THIS_FILE}:{expected_line}");
    let line = &capture.lines()[0];
    assert!(line.contains(&format!(" {caller:>18} | ")), "{line}");
}

/// Verifies entries without location information leave the column blank.
#[test]
fn disabled_caller_reporting_leaves_column_blank() {
    let (logger, capture) = capture_logger(false);

    logger.warn("no location");

    assert_eq!(only_caller(&capture), "");
    assert!(capture.contents().contains(&format!(" {} | ", " ".repeat(18))));
}

/// Verifies `v` annotates with `unknown:0` when caller reporting is off.
#[test]
fn v_falls_back_to_unknown_location() {
    let (logger, capture) = capture_logger(false);

    logger.v(1).info("verbose");

    assert_eq!(only_caller(&capture), "unknown:0");
}

/// Verifies `v` annotates entries with the line that called it.
#[test]
fn v_records_call_site() {
    let (logger, capture) = capture_logger(true);

    let expected_line = line!() + 1;
    let entry = logger.v(0);
    entry.infoln(("first", "call"));

    assert_eq!(only_caller(&capture), format!("{THIS_FILE}:{expected_line}"));
}

/// Verifies `Caller::capture` reports the invoking line.
#[test]
fn caller_capture_reports_invoking_line() {
    let expected_line = line!() + 1;
    let caller = Caller::capture();

    assert_eq!(caller.line(), expected_line);
    assert_eq!(caller.basename(), THIS_FILE);
    assert_eq!(caller.to_string(), format!("{THIS_FILE}:{expected_line}"));
}
