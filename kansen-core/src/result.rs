//! Aggregation of trial samples into infection-probability estimates.
//!
//! [`InfectionResult`] owns a fixed `trial_count x node_count` matrix that is
//! filled one row per trial. Summaries are derived from the rows written so
//! far and are cached until the next call recomputes them.

use crate::{error::AggregateError, sample::Sample};

/// Sample matrix plus its derived per-node and population summaries.
///
/// # Examples
/// ```
/// use kansen_core::{InfectionResult, Sample};
///
/// let mut result = InfectionResult::new(2, 2)?;
/// result.add_next(&Sample::from_flags([true, false]))?;
/// result.add_next(&Sample::from_flags([true, true]))?;
///
/// assert_eq!(result.calculate_expected_values(), &[1.0, 0.5]);
/// assert_eq!(result.calculate_infection_rate()?, 0.75);
/// # Ok::<(), kansen_core::AggregateError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InfectionResult {
    node_count: usize,
    trial_count: usize,
    samples: Vec<u8>,
    rows_written: usize,
    expected_values: Option<Vec<f64>>,
    infection_rate: Option<f64>,
}

impl InfectionResult {
    /// Allocates an empty matrix for `trial_count` samples of `node_count`
    /// entries each.
    ///
    /// # Errors
    /// Returns [`AggregateError::CapacityOverflow`] when the matrix size
    /// overflows `usize`.
    pub fn new(node_count: usize, trial_count: usize) -> Result<Self, AggregateError> {
        let cells = node_count
            .checked_mul(trial_count)
            .ok_or(AggregateError::CapacityOverflow {
                rows: trial_count,
                columns: node_count,
            })?;
        Ok(Self {
            node_count,
            trial_count,
            samples: vec![0; cells],
            rows_written: 0,
            expected_values: None,
            infection_rate: None,
        })
    }

    /// Returns the number of entries per sample.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of rows the matrix was allocated with.
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Returns how many samples have been accepted.
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Returns whether every row has been written.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rows_written == self.trial_count
    }

    /// Stores `sample` in the next free row.
    ///
    /// # Errors
    /// Returns [`AggregateError::CapacityExceeded`] when the matrix is full
    /// and [`AggregateError::DimensionMismatch`] when the sample length
    /// differs from the node count. The matrix is unchanged on error.
    pub fn add_next(&mut self, sample: &Sample) -> Result<(), AggregateError> {
        if self.is_full() {
            return Err(AggregateError::CapacityExceeded {
                capacity: self.trial_count,
            });
        }
        if sample.len() != self.node_count {
            return Err(AggregateError::DimensionMismatch {
                expected: self.node_count,
                actual: sample.len(),
            });
        }
        let start = self.rows_written * self.node_count;
        if let Some(row) = self.samples.get_mut(start..start + self.node_count) {
            row.copy_from_slice(sample.as_slice());
        }
        self.rows_written += 1;
        Ok(())
    }

    /// Iterates over the rows written so far.
    pub fn samples(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let width = self.node_count;
        (0..self.rows_written).map(move |row| {
            let start = row * width;
            self.samples.get(start..start + width).unwrap_or_default()
        })
    }

    /// Computes the per-node mean over the rows written so far.
    ///
    /// With no rows written every node's expected value is `0.0`.
    pub fn calculate_expected_values(&mut self) -> &[f64] {
        let mut totals = vec![0_u64; self.node_count];
        for row in self.samples() {
            for (total, &flag) in totals.iter_mut().zip(row) {
                *total += u64::from(flag);
            }
        }
        let rows = self.rows_written as f64;
        let values = totals
            .into_iter()
            .map(|total| if rows > 0.0 { total as f64 / rows } else { 0.0 })
            .collect();
        self.expected_values.insert(values)
    }

    /// Computes the mean of the expected-value vector.
    ///
    /// An empty node set yields `0.0`.
    ///
    /// # Errors
    /// Returns [`AggregateError::ExpectedValuesMissing`] when
    /// [`Self::calculate_expected_values`] has not run yet.
    pub fn calculate_infection_rate(&mut self) -> Result<f64, AggregateError> {
        let values = self
            .expected_values
            .as_deref()
            .ok_or(AggregateError::ExpectedValuesMissing)?;
        let rate = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        self.infection_rate = Some(rate);
        Ok(rate)
    }

    /// Returns the cached per-node expected values, if calculated.
    #[must_use]
    pub fn expected_values(&self) -> Option<&[f64]> {
        self.expected_values.as_deref()
    }

    /// Returns the cached infection rate, if calculated.
    #[must_use]
    pub fn infection_rate(&self) -> Option<f64> {
        self.infection_rate
    }
}
