//! Per-edge transmission probabilities derived from contact durations.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{Result, error::KansenError, graph::ContactGraph};

/// Parameters mapping a contact duration onto a transmission probability.
///
/// # Examples
/// ```
/// use kansen_core::TransmissionParams;
///
/// let params = TransmissionParams::new(0.4, 60.0).expect("parameters are valid");
/// assert_eq!(params.probability_for(30.0), 0.2);
/// assert_eq!(params.probability_for(600.0), 0.4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionParams {
    probability_upper_bound: f64,
    max_duration: f64,
}

impl TransmissionParams {
    /// Validates and stores the model parameters.
    ///
    /// # Errors
    /// Returns [`KansenError::InvalidModelInput`] when the upper bound is not a
    /// finite value in `[0, 1]` or when `max_duration` is not strictly
    /// positive and finite.
    pub fn new(probability_upper_bound: f64, max_duration: f64) -> Result<Self> {
        if !probability_upper_bound.is_finite() || !(0.0..=1.0).contains(&probability_upper_bound)
        {
            return Err(KansenError::invalid_model_input(format!(
                "probability_upper_bound must lie in [0, 1] (got {probability_upper_bound})"
            )));
        }
        if !max_duration.is_finite() || max_duration <= 0.0 {
            return Err(KansenError::invalid_model_input(format!(
                "max_duration must be positive (got {max_duration})"
            )));
        }
        Ok(Self {
            probability_upper_bound,
            max_duration,
        })
    }

    /// Returns the probability ceiling `a_max`.
    #[must_use]
    pub fn probability_upper_bound(&self) -> f64 {
        self.probability_upper_bound
    }

    /// Returns the normalising duration.
    #[must_use]
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Maps a non-negative duration to `min(duration / max_duration * a_max, a_max)`.
    #[must_use]
    pub fn probability_for(&self, duration: f64) -> f64 {
        let scaled = (duration / self.max_duration) * self.probability_upper_bound;
        scaled.min(self.probability_upper_bound)
    }
}

/// Symmetric lookup from an ordered node pair to its transmission probability.
///
/// Both orientations of every graph edge are stored with the same value.
#[derive(Debug, Clone, Default)]
pub struct EdgeProbabilityTable {
    entries: HashMap<(usize, usize), f64>,
}

impl EdgeProbabilityTable {
    /// Builds the table for every edge of `graph`.
    ///
    /// # Errors
    /// Returns [`KansenError::InvalidModelInput`] when an edge lacks a
    /// duration or carries a negative or non-finite one.
    ///
    /// # Examples
    /// ```
    /// use kansen_core::{ContactGraphBuilder, EdgeProbabilityTable, TransmissionParams};
    ///
    /// let mut builder = ContactGraphBuilder::new();
    /// builder.add_edge("a", "b", Some(10.0));
    /// let graph = builder.build();
    /// let params = TransmissionParams::new(1.0, 10.0)?;
    /// let table = EdgeProbabilityTable::from_graph(&graph, &params)?;
    /// assert_eq!(table.get(0, 1), Some(1.0));
    /// assert_eq!(table.get(1, 0), Some(1.0));
    /// # Ok::<(), kansen_core::KansenError>(())
    /// ```
    #[instrument(
        name = "core.edge_probabilities",
        err,
        skip(graph, params),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            upper_bound = params.probability_upper_bound(),
            max_duration = params.max_duration(),
        ),
    )]
    pub fn from_graph(graph: &ContactGraph, params: &TransmissionParams) -> Result<Self> {
        let mut entries = HashMap::with_capacity(graph.edge_count().saturating_mul(2));
        for edge in graph.edges() {
            let (source, target) = (edge.source(), edge.target());
            let duration = edge.duration().ok_or_else(|| {
                KansenError::invalid_model_input(format!(
                    "edge `{}` - `{}` has no duration attribute",
                    graph.shared_label(source),
                    graph.shared_label(target),
                ))
            })?;
            if !duration.is_finite() || duration < 0.0 {
                return Err(KansenError::invalid_model_input(format!(
                    "edge `{}` - `{}` has invalid duration {duration}",
                    graph.shared_label(source),
                    graph.shared_label(target),
                )));
            }
            let probability = params.probability_for(duration);
            entries.insert((source, target), probability);
            entries.insert((target, source), probability);
        }
        debug!(entries = entries.len(), "edge probability table built");
        Ok(Self { entries })
    }

    /// Returns the probability for the ordered pair, if the edge exists.
    #[must_use]
    pub fn get(&self, source: usize, target: usize) -> Option<f64> {
        self.entries.get(&(source, target)).copied()
    }

    /// Returns the number of ordered entries (two per non-loop edge).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn without_entry(mut self, source: usize, target: usize) -> Self {
        self.entries.remove(&(source, target));
        self
    }
}
