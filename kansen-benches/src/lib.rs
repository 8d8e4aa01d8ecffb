//! Benchmark support crate for kansen.
//!
//! Provides synthetic contact graphs and parameter types used by the Criterion
//! benchmarks for a single trial and for a complete Monte Carlo run.

pub mod error;
pub mod params;
pub mod source;
