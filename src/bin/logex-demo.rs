#![deny(unsafe_code)]

#[path = "scenarios.rs"]
mod scenarios;

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    scenarios::run_with(std::env::args_os(), &mut stdout, &mut stderr)
}
