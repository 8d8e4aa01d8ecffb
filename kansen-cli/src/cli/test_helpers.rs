//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests lay out an input directory, an output directory, and a
//! configuration file pointing at both. These helpers keep the cases concise.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::super::commands::run_command;
use super::super::{Cli, CliError, Command, RunCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Writes a configuration for `input_type` rooted at `dir`, appending any
/// `extra` lines verbatim.
pub(super) fn write_config(
    dir: &TempDir,
    input_type: &str,
    iter: usize,
    extra: &str,
) -> io::Result<PathBuf> {
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    let contents = format!(
        "input_type={input_type}\n\
         input_path={}\n\
         output_path={}\n\
         probability_upper_bound=1.0\n\
         max_duration=10\n\
         iter={iter}\n\
         initial_size=1\n\
         time_steps=10\n\
         latency_period=1\n\
         infection_period=3\n\
         {extra}",
        input.display(),
        output.display(),
    );
    write_file(dir.path(), "config.txt", &contents)
}

pub(super) fn run_args(config: PathBuf) -> RunCommand {
    RunCommand {
        config,
        seed: None,
        parallel: false,
        output: None,
    }
}

pub(super) fn cli_for(config: PathBuf) -> Cli {
    Cli {
        command: Command::Run(run_args(config)),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
