//! Discrete-time latency/infectious spread for a single trial.
//!
//! A trial seeds `initial_size` random nodes as infectious and then advances
//! in rounds. Each round walks the active set in ascending index order and
//! updates counters in place:
//!
//! - a dormant node (negative counter) advances by one;
//! - an infectious node draws one uniform value per dormant neighbour and
//!   advances that neighbour when the draw falls below the edge probability,
//!   then advances itself and stays active while its counter is at most
//!   `infection_period`.
//!
//! Because updates are in place, a dormant node exposed by several
//! infectious neighbours in one round advances once per successful exposure,
//! and a node promoted earlier in the round is seen as infectious by nodes
//! processed later in the same round.
//!
//! The trial ends when the active set is empty or after `time_steps` rounds.

mod state;

use rand::{Rng, seq::index};
use tracing::{instrument, trace};

use crate::{
    Result,
    error::KansenError,
    graph::ContactGraph,
    probability::EdgeProbabilityTable,
    sample::Sample,
};

use state::TrialState;

/// Parameters governing a single trial.
///
/// # Examples
/// ```
/// use kansen_core::SimulationParams;
///
/// let params = SimulationParams::new(1, 50, 2, 5);
/// assert_eq!(params.time_steps(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParams {
    initial_size: usize,
    time_steps: u32,
    latency_period: u32,
    infection_period: u32,
}

impl SimulationParams {
    /// Creates a parameter set.
    #[must_use]
    pub const fn new(
        initial_size: usize,
        time_steps: u32,
        latency_period: u32,
        infection_period: u32,
    ) -> Self {
        Self {
            initial_size,
            time_steps,
            latency_period,
            infection_period,
        }
    }

    /// Returns the number of nodes seeded as infectious.
    #[must_use]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Returns the round budget.
    #[must_use]
    pub fn time_steps(&self) -> u32 {
        self.time_steps
    }

    /// Returns the number of counter steps a node spends dormant.
    #[must_use]
    pub fn latency_period(&self) -> u32 {
        self.latency_period
    }

    /// Returns the last counter value at which a node is still infectious.
    #[must_use]
    pub fn infection_period(&self) -> u32 {
        self.infection_period
    }
}

/// Result of one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    sample: Sample,
    rounds: u32,
}

impl TrialOutcome {
    /// Returns the ever-infected flags.
    #[must_use]
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Consumes the outcome and returns the sample.
    #[must_use]
    pub fn into_sample(self) -> Sample {
        self.sample
    }

    /// Returns the number of rounds executed before termination.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

/// Runs trials over a shared read-only graph and probability table.
///
/// # Examples
/// ```
/// use kansen_core::{
///     ContactGraphBuilder, EdgeProbabilityTable, SimulationEngine, SimulationParams,
///     TransmissionParams, trial_rng,
/// };
///
/// let mut builder = ContactGraphBuilder::new();
/// builder.add_edge("a", "b", Some(10.0));
/// let graph = builder.build();
/// let table = EdgeProbabilityTable::from_graph(&graph, &TransmissionParams::new(1.0, 10.0)?)?;
/// let engine = SimulationEngine::new(&graph, &table, SimulationParams::new(1, 5, 1, 1))?;
///
/// let outcome = engine.run_trial(&mut trial_rng(0, 0))?;
/// assert_eq!(outcome.sample().as_slice(), &[1, 1]);
/// # Ok::<(), kansen_core::KansenError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimulationEngine<'a> {
    graph: &'a ContactGraph,
    table: &'a EdgeProbabilityTable,
    params: SimulationParams,
}

impl<'a> SimulationEngine<'a> {
    /// Binds the engine to a graph, its probability table, and parameters.
    ///
    /// # Errors
    /// Returns [`KansenError::InvalidInitialSize`] when more seeds are
    /// requested than the graph has nodes.
    pub fn new(
        graph: &'a ContactGraph,
        table: &'a EdgeProbabilityTable,
        params: SimulationParams,
    ) -> Result<Self> {
        if params.initial_size > graph.node_count() {
            return Err(KansenError::InvalidInitialSize {
                initial_size: params.initial_size,
                node_count: graph.node_count(),
            });
        }
        Ok(Self {
            graph,
            table,
            params,
        })
    }

    /// Returns the parameters the engine was built with.
    #[must_use]
    pub fn params(&self) -> SimulationParams {
        self.params
    }

    /// Returns the graph the engine simulates over.
    #[must_use]
    pub fn graph(&self) -> &'a ContactGraph {
        self.graph
    }

    /// Runs one trial, consuming randomness from `rng`.
    ///
    /// # Errors
    /// Returns [`KansenError::InconsistentProbabilityTable`] when a graph edge
    /// has no probability entry.
    #[instrument(
        level = "trace",
        name = "core.trial",
        err,
        skip(self, rng),
        fields(nodes = self.graph.node_count()),
    )]
    pub fn run_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrialOutcome> {
        let seeds = index::sample(rng, self.graph.node_count(), self.params.initial_size);
        self.run_from_seeds(&seeds.into_vec(), rng, |_, _| {})
    }

    /// Runs one trial from explicit seeds, reporting the counters after
    /// every round.
    pub(crate) fn run_from_seeds<R, F>(
        &self,
        seeds: &[usize],
        rng: &mut R,
        mut inspect: F,
    ) -> Result<TrialOutcome>
    where
        R: Rng + ?Sized,
        F: FnMut(u32, &[i64]),
    {
        let mut state =
            TrialState::seeded(self.graph.node_count(), self.params.latency_period, seeds);

        let mut rounds = 0_u32;
        while !state.is_quiescent() && rounds < self.params.time_steps {
            self.advance_round(&mut state, rng)?;
            rounds += 1;
            inspect(rounds, state.counters());
        }

        let sample = state.into_sample();
        trace!(rounds, infected = sample.infected_count(), "trial finished");
        Ok(TrialOutcome { sample, rounds })
    }

    fn advance_round<R: Rng + ?Sized>(&self, state: &mut TrialState, rng: &mut R) -> Result<()> {
        let infection_period = i64::from(self.params.infection_period);
        let active = state.take_active();
        for &node in &active {
            if state.counter(node) < 0 {
                state.increment(node);
                state.schedule(node);
                continue;
            }

            for &neighbour in self.graph.neighbours(node) {
                if state.counter(neighbour) >= 0 {
                    continue;
                }
                let probability = self.table.get(node, neighbour).ok_or_else(|| {
                    KansenError::InconsistentProbabilityTable {
                        infectious: self.graph.shared_label(node),
                        exposed: self.graph.shared_label(neighbour),
                    }
                })?;
                let draw: f64 = rng.r#gen();
                if draw < probability {
                    state.increment(neighbour);
                    state.schedule(neighbour);
                }
            }

            if state.increment(node) <= infection_period {
                state.schedule(node);
            }
        }
        state.finish_round(active);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
