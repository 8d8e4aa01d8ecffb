//! Shared test utilities used across kansen crates.

pub mod ci;
pub mod tracing;
