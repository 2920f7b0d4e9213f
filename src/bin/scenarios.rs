use std::ffi::OsString;
use std::io::{self, Write};
use std::panic;
use std::process::ExitCode;

use logex::{Level, LoggerConfig};

/// Named call sequences the demo binary can run against the process logger.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scenario {
    Levels,
    Threshold,
    Formatted,
    Fields,
    Tracing,
    LazyThreshold,
    Placeholders,
    Fatal,
    Fatalf,
    Fatalln,
    FatalNoCaller,
    Exit,
    Exitln,
    Panic,
    PanicRecovered,
}

impl Scenario {
    pub const ALL: [(&'static str, Self); 15] = [
        ("levels", Self::Levels),
        ("threshold", Self::Threshold),
        ("formatted", Self::Formatted),
        ("fields", Self::Fields),
        ("tracing", Self::Tracing),
        ("lazy-threshold", Self::LazyThreshold),
        ("placeholders", Self::Placeholders),
        ("fatal", Self::Fatal),
        ("fatalf", Self::Fatalf),
        ("fatalln", Self::Fatalln),
        ("fatal-no-caller", Self::FatalNoCaller),
        ("exit", Self::Exit),
        ("exitln", Self::Exitln),
        ("panic", Self::Panic),
        ("panic-recovered", Self::PanicRecovered),
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, scenario)| *scenario)
    }
}

/// Parses `args` (program name first), installs the process logger and runs
/// the requested scenario.
///
/// Log lines go to standard error through the process logger; `stdout` only
/// receives scenario results, and `stderr` only usage errors.
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let args: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|arg| arg.into().to_string_lossy().into_owned())
        .collect();

    let Some(scenario) = args.first().and_then(|name| Scenario::parse(name)) else {
        let _ = writeln!(stderr, "usage: logex-demo <scenario> [level]");
        for (name, _) in Scenario::ALL {
            let _ = writeln!(stderr, "  {name}");
        }
        return ExitCode::from(2);
    };

    let threshold = match args.get(1).map(|raw| raw.parse::<Level>()) {
        None => Level::Debug,
        Some(Ok(level)) => level,
        Some(Err(error)) => {
            let _ = writeln!(stderr, "logex-demo: {error}");
            return ExitCode::from(2);
        }
    };

    // The lazy scenario relies on the process logger created on first use.
    if scenario != Scenario::LazyThreshold {
        let config = LoggerConfig::default()
            .ansi(false)
            .level(threshold)
            .report_caller(scenario != Scenario::FatalNoCaller);
        if let Err(error) = logex::init(config) {
            let _ = writeln!(stderr, "logex-demo: {error}");
            return ExitCode::FAILURE;
        }
    }

    run(scenario, stdout)
}

fn run<Out: Write>(scenario: Scenario, stdout: &mut Out) -> ExitCode {
    match scenario {
        Scenario::Levels => {
            logex::debug("debug entry");
            logex::info("info entry");
            logex::warn("warn entry");
            logex::error("error entry");
        }
        Scenario::Threshold => {
            logex::set_level(Level::Warn);
            logex::info("hello");
            logex::warn("disk low");
        }
        Scenario::Formatted => logex::errorf!("code={}", 42),
        Scenario::Fields => {
            let error = io::Error::new(io::ErrorKind::TimedOut, "upstream timed out");
            logex::with_field("attempt", 2)
                .with_error(&error)
                .warn("upload failed");
        }
        Scenario::Tracing => tracing::warn!(peer = "10.0.0.1", "from tracing"),
        Scenario::LazyThreshold => {
            logex::warn("before");
            logex::set_level(Level::Warn);
            logex::info("hello");
            logex::warn("disk low");
            tracing::info!("suppressed from tracing");
            tracing::warn!("from tracing");
        }
        Scenario::Placeholders => {
            logex::serialize(("state", 1));
            logex::serializef(format_args!("state={}", 1));
            logex::flush();
            logex::flush_exit();
        }
        Scenario::Fatal | Scenario::FatalNoCaller => logex::fatal("bye"),
        Scenario::Fatalf => logex::fatalf!("bye {}", 1),
        Scenario::Fatalln => logex::fatalln(("bye", 1)),
        Scenario::Exit => logex::exit("bye"),
        Scenario::Exitln => logex::exitln(("bye", "now")),
        Scenario::Panic => logex::panic("boom"),
        Scenario::PanicRecovered => {
            let outcome = panic::catch_unwind(|| logex::panicf!("boom {}", 7));
            let payload = outcome.err().and_then(|payload| payload.downcast::<String>().ok());
            match payload {
                Some(message) => {
                    let _ = writeln!(stdout, "recovered: {message}");
                }
                None => return ExitCode::FAILURE,
            }
        }
    }
    ExitCode::SUCCESS
}
