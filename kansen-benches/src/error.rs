//! Benchmark setup error type.
//!
//! Lets setup functions propagate graph generation and model failures with
//! `?` instead of using `.expect()`.

use crate::source::SyntheticError;
use kansen_core::KansenError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Building the probability table or running trials failed.
    #[error("simulation failed: {0}")]
    Core(#[from] KansenError),
}
