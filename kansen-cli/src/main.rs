//! CLI entry point for the kansen simulator.
//!
//! Initialises logging, parses arguments with clap, runs the simulation,
//! renders the summary to stdout, and maps failures to a non-zero exit code
//! after logging their stable error codes.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use kansen_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, aggregate_code) = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some((Some(core.code()), core.aggregate_code())),
                _ => None,
            })
            .unwrap_or((None, None));

        let message = format!("{err:#}");
        error!(
            error = %message,
            code = code.map(|code| field::display(code.as_str())),
            aggregate_code = aggregate_code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
