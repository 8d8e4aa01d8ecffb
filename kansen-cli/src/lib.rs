//! Support library for the kansen CLI binary.
//!
//! Exposes configuration loading, the command pipeline, and result
//! persistence so doctests and unit tests can drive a full run without
//! spawning a subprocess.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod progress;
