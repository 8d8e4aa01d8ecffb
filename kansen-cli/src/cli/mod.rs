//! Command-line interface orchestration for the kansen simulator.
//!
//! The `run` command reads a simulation configuration file, loads the contact
//! graph it points at, executes the Monte Carlo trials, and writes the node
//! probability vector and infection-rate report to the output directory.

mod commands;

pub use commands::{Cli, CliError, Command, ExecutionSummary, RunCommand, render_summary, run_cli};
