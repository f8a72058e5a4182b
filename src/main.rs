//! The `c8` binary.
//!
//! Logging is off unless `C8_LOG` holds a filter such as `debug` or
//! `c8=trace`; log lines go to standard error.

use std::io::{self, Write};
use std::process::ExitCode;

use c8::cli::{self, ExitFlags, Streams};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("C8_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let mut flags = cli::run(
        std::env::args_os(),
        &mut Streams::new(&mut input, &mut out, &mut err),
    );

    if out.flush().is_err() && !flags.contains(ExitFlags::OUTPUT) {
        flags |= ExitFlags::OUTPUT;
        if writeln!(err, "{}: output error", cli::TOOL_NAME).is_err() {
            flags |= ExitFlags::GENERIC;
        }
    }

    ExitCode::from(flags.code())
}
