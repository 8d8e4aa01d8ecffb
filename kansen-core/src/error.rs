//! Error types for the kansen core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::InfectionResult`] when a sample cannot be
/// stored or a summary cannot be derived.
///
/// Rejections never mutate the sample matrix, so callers may inspect the
/// error and continue with the same aggregator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AggregateError {
    /// Every row of the sample matrix has already been written.
    #[error("sample matrix is full ({capacity} rows already written)")]
    CapacityExceeded {
        /// Number of rows the matrix was allocated with.
        capacity: usize,
    },
    /// The sample length did not match the node count.
    #[error("sample has {actual} entries but the graph has {expected} nodes")]
    DimensionMismatch {
        /// Node count the matrix was allocated with.
        expected: usize,
        /// Length of the rejected sample.
        actual: usize,
    },
    /// The infection rate was requested before the expected values existed.
    #[error("expected values must be calculated before the infection rate")]
    ExpectedValuesMissing,
    /// The requested matrix does not fit in addressable memory.
    #[error("sample matrix with {rows} rows and {columns} columns exceeds capacity limits")]
    CapacityOverflow {
        /// Requested number of trials.
        rows: usize,
        /// Requested number of nodes.
        columns: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`AggregateError`] variants.
    enum AggregateErrorCode for AggregateError {
        /// Every row of the sample matrix has already been written.
        CapacityExceeded => CapacityExceeded { .. } => "AGGREGATE_CAPACITY_EXCEEDED",
        /// The sample length did not match the node count.
        DimensionMismatch => DimensionMismatch { .. } => "AGGREGATE_DIMENSION_MISMATCH",
        /// The infection rate was requested before the expected values existed.
        ExpectedValuesMissing => ExpectedValuesMissing => "AGGREGATE_EXPECTED_VALUES_MISSING",
        /// The requested matrix does not fit in addressable memory.
        CapacityOverflow => CapacityOverflow { .. } => "AGGREGATE_CAPACITY_OVERFLOW",
    }
}

/// Error type produced when building the probability model or running
/// simulations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum KansenError {
    /// The graph or transmission parameters cannot produce a probability table.
    #[error("invalid model input: {reason}")]
    InvalidModelInput {
        /// Human-readable description of the offending input.
        reason: Arc<str>,
    },
    /// A graph edge has no entry in the probability table.
    #[error("probability table has no entry for edge `{infectious}` -> `{exposed}`")]
    InconsistentProbabilityTable {
        /// Label of the transmitting node.
        infectious: Arc<str>,
        /// Label of the receiving node.
        exposed: Arc<str>,
    },
    /// More initial infections were requested than the graph has nodes.
    #[error("initial_size {initial_size} exceeds the node count {node_count}")]
    InvalidInitialSize {
        /// Requested number of seeded infections.
        initial_size: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The result aggregator rejected a trial outcome.
    #[error("result aggregation failed: {error}")]
    Aggregate {
        #[source]
        /// Underlying aggregator error.
        error: AggregateError,
    },
}

define_error_codes! {
    /// Stable codes describing [`KansenError`] variants.
    enum KansenErrorCode for KansenError {
        /// The graph or transmission parameters cannot produce a probability table.
        InvalidModelInput => InvalidModelInput { .. } => "KANSEN_INVALID_MODEL_INPUT",
        /// A graph edge has no entry in the probability table.
        InconsistentProbabilityTable => InconsistentProbabilityTable { .. } => "KANSEN_INCONSISTENT_PROBABILITY_TABLE",
        /// More initial infections were requested than the graph has nodes.
        InvalidInitialSize => InvalidInitialSize { .. } => "KANSEN_INVALID_INITIAL_SIZE",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "KANSEN_BACKEND_UNAVAILABLE",
        /// The result aggregator rejected a trial outcome.
        AggregateFailure => Aggregate { .. } => "KANSEN_AGGREGATE_FAILURE",
    }
}

impl KansenError {
    /// Retrieve the inner [`AggregateErrorCode`] when the error originated in
    /// the result aggregator.
    pub const fn aggregate_code(&self) -> Option<AggregateErrorCode> {
        match self {
            Self::Aggregate { error } => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn invalid_model_input(reason: impl Into<Arc<str>>) -> Self {
        Self::InvalidModelInput {
            reason: reason.into(),
        }
    }
}

impl From<AggregateError> for KansenError {
    fn from(error: AggregateError) -> Self {
        Self::Aggregate { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, KansenError>;
