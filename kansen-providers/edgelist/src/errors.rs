use thiserror::Error;

/// Failures raised while reading a CSV edge list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdgeListProviderError {
    /// The input contained no header row.
    #[error("edge list is empty; expected a header row")]
    MissingHeader,
    /// A required column is absent from the header.
    #[error("column `{column}` not found in edge list header")]
    ColumnNotFound {
        /// Name of the missing column.
        column: &'static str,
    },
    /// A row has fewer fields than the header requires.
    #[error("line {line} has {actual} fields but at least {expected} are required")]
    ShortRow {
        /// One-based line number.
        line: usize,
        /// Minimum number of fields needed to reach every required column.
        expected: usize,
        /// Number of fields found.
        actual: usize,
    },
    /// A node identifier cell is empty.
    #[error("line {line} has an empty `{column}` value")]
    EmptyNodeId {
        /// One-based line number.
        line: usize,
        /// Column holding the empty identifier.
        column: &'static str,
    },
    /// A duration cell is not a number.
    #[error("line {line} has invalid duration `{value}`")]
    InvalidDuration {
        /// One-based line number.
        line: usize,
        /// Offending cell contents.
        value: String,
    },
    /// A quoted field was not closed before the end of the line.
    #[error("line {line} has an unterminated quoted field")]
    UnterminatedQuote {
        /// One-based line number.
        line: usize,
    },
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
