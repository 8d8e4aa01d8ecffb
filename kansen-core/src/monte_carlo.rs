//! Monte Carlo orchestration over independent trials.
//!
//! Provides the [`MonteCarlo`] runtime entry point, the [`TrialObserver`]
//! progress hook, and the sequential and parallel trial schedulers.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::ExecutionStrategy,
    graph::ContactGraph,
    probability::EdgeProbabilityTable,
    result::InfectionResult,
    sample::Sample,
    seed::trial_rng,
    simulation::{SimulationEngine, SimulationParams},
};

/// Receives a notification after every completed trial.
///
/// Parallel runs call the observer from worker threads, so `completed`
/// counts finished trials rather than naming a trial index.
pub trait TrialObserver: Sync {
    /// Called once per finished trial with the running total.
    fn on_trial_complete(&self, completed: usize, total: usize);
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TrialObserver for NoopObserver {
    fn on_trial_complete(&self, _completed: usize, _total: usize) {}
}

impl<F> TrialObserver for F
where
    F: Fn(usize, usize) + Sync,
{
    fn on_trial_complete(&self, completed: usize, total: usize) {
        self(completed, total);
    }
}

/// Entry point for estimating per-node infection probabilities.
///
/// # Examples
/// ```
/// use kansen_core::{
///     ContactGraphBuilder, EdgeProbabilityTable, ExecutionStrategy, MonteCarloBuilder,
///     NoopObserver, SimulationParams, TransmissionParams,
/// };
///
/// let mut builder = ContactGraphBuilder::new();
/// builder.add_edge("a", "b", Some(10.0));
/// let graph = builder.build();
/// let table = EdgeProbabilityTable::from_graph(&graph, &TransmissionParams::new(1.0, 10.0)?)?;
///
/// let runner = MonteCarloBuilder::new()
///     .with_trials(20)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()?;
/// let result = runner.run(&graph, &table, SimulationParams::new(1, 5, 1, 2), &NoopObserver)?;
/// assert_eq!(result.expected_values(), Some(&[1.0, 1.0][..]));
/// assert_eq!(result.infection_rate(), Some(1.0));
/// # Ok::<(), kansen_core::KansenError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarlo {
    trials: usize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
    resolved_strategy: ExecutionStrategy,
}

impl MonteCarlo {
    pub(crate) fn new(
        trials: usize,
        seed: u64,
        execution_strategy: ExecutionStrategy,
        resolved_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            trials,
            seed,
            execution_strategy,
            resolved_strategy,
        }
    }

    /// Returns the number of trials per run.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Returns the base seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the strategy requested on the builder.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the concrete scheduler used by [`Self::run`]; never `Auto`.
    #[must_use]
    pub fn resolved_strategy(&self) -> ExecutionStrategy {
        self.resolved_strategy
    }

    /// Runs every trial, aggregates the samples in trial order, and computes
    /// the expected values and infection rate.
    ///
    /// # Errors
    /// Returns [`crate::KansenError::InvalidInitialSize`] when `params`
    /// requests more seeds than the graph has nodes,
    /// [`crate::KansenError::InconsistentProbabilityTable`] when a trial hits
    /// an edge without a probability, and [`crate::KansenError::Aggregate`]
    /// when the sample matrix cannot be allocated.
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph, table, params, observer),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            trials = self.trials,
            seed = self.seed,
            strategy = ?self.resolved_strategy,
        ),
    )]
    pub fn run<O>(
        &self,
        graph: &ContactGraph,
        table: &EdgeProbabilityTable,
        params: SimulationParams,
        observer: &O,
    ) -> Result<InfectionResult>
    where
        O: TrialObserver + ?Sized,
    {
        let engine = SimulationEngine::new(graph, table, params)?;
        let mut result = InfectionResult::new(graph.node_count(), self.trials)?;

        match self.resolved_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => {
                for sample in self.run_parallel(&engine, observer)? {
                    result.add_next(&sample)?;
                }
            }
            _ => self.run_sequential(&engine, &mut result, observer)?,
        }

        result.calculate_expected_values();
        let infection_rate = result.calculate_infection_rate()?;
        info!(
            trials = result.rows_written(),
            nodes = result.node_count(),
            infection_rate,
            "monte carlo run complete"
        );
        Ok(result)
    }

    fn run_sequential<O>(
        &self,
        engine: &SimulationEngine<'_>,
        result: &mut InfectionResult,
        observer: &O,
    ) -> Result<()>
    where
        O: TrialObserver + ?Sized,
    {
        for trial in 0..self.trials {
            let sample = self.run_one(engine, trial)?;
            result.add_next(&sample)?;
            observer.on_trial_complete(trial + 1, self.trials);
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<O>(&self, engine: &SimulationEngine<'_>, observer: &O) -> Result<Vec<Sample>>
    where
        O: TrialObserver + ?Sized,
    {
        use rayon::prelude::*;

        let completed = AtomicUsize::new(0);
        (0..self.trials)
            .into_par_iter()
            .map(|trial| {
                let sample = self.run_one(engine, trial)?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                observer.on_trial_complete(done, self.trials);
                Ok(sample)
            })
            .collect()
    }

    fn run_one(&self, engine: &SimulationEngine<'_>, trial: usize) -> Result<Sample> {
        let outcome = engine.run_trial(&mut trial_rng(self.seed, trial))?;
        debug!(
            trial,
            rounds = outcome.rounds(),
            infected = outcome.sample().infected_count(),
            "trial complete"
        );
        Ok(outcome.into_sample())
    }
}
