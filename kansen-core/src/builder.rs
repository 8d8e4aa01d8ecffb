//! Builder utilities for configuring Monte Carlo runs.
//!
//! Exposes the execution strategy selection surface and builder validation used before constructing [`MonteCarlo`] instances.

use crate::{Result, error::KansenError, monte_carlo::MonteCarlo};

/// Indicates how [`MonteCarlo`] schedules trials when [`MonteCarlo::run`] is
/// invoked.
///
/// `Auto` resolves deterministically: it uses the worker pool when the
/// `parallel` feature is compiled in and runs sequentially otherwise. Every
/// strategy yields the same sample matrix for the same base seed because each
/// trial derives its own random stream from its index.
///
/// # Examples
/// ```
/// use kansen_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select an appropriate scheduler automatically.
    Auto,
    /// Run trials one after another on the calling thread.
    Sequential,
    /// Run trials on the rayon worker pool.
    Parallel,
}

/// Configures and constructs [`MonteCarlo`] instances.
///
/// # Examples
/// ```
/// use kansen_core::{ExecutionStrategy, MonteCarloBuilder};
///
/// let runner = MonteCarloBuilder::new()
///     .with_trials(250)
///     .with_seed(7)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(runner.trials(), 250);
/// assert_eq!(runner.seed(), 7);
/// assert_eq!(runner.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloBuilder {
    trials: usize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Default for MonteCarloBuilder {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: 0,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl MonteCarloBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use kansen_core::{ExecutionStrategy, MonteCarloBuilder};
    ///
    /// let builder = MonteCarloBuilder::new();
    /// assert_eq!(builder.trials(), 100);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of trials. Zero is accepted and produces an
    /// all-zero estimate.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured number of trials.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Overrides the base seed from which per-trial streams are derived.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the execution strategy to use when running trials.
    ///
    /// # Examples
    /// ```
    /// use kansen_core::{ExecutionStrategy, MonteCarloBuilder};
    ///
    /// let builder = MonteCarloBuilder::new().with_execution_strategy(ExecutionStrategy::Sequential);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`MonteCarlo`] instance.
    ///
    /// # Errors
    /// Returns [`KansenError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    pub fn build(self) -> Result<MonteCarlo> {
        let resolved = match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => ExecutionStrategy::Parallel,
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => ExecutionStrategy::Sequential,
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => {
                return Err(KansenError::BackendUnavailable {
                    requested: ExecutionStrategy::Parallel,
                });
            }
            ExecutionStrategy::Sequential => ExecutionStrategy::Sequential,
        };

        Ok(MonteCarlo::new(
            self.trials,
            self.seed,
            self.execution_strategy,
            resolved,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_is_always_available() {
        let runner = MonteCarloBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .build()
            .expect("sequential execution must be available");
        assert_eq!(runner.resolved_strategy(), ExecutionStrategy::Sequential);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn auto_resolves_to_parallel_when_compiled_in() {
        let runner = MonteCarloBuilder::new()
            .build()
            .expect("auto must resolve");
        assert_eq!(runner.execution_strategy(), ExecutionStrategy::Auto);
        assert_eq!(runner.resolved_strategy(), ExecutionStrategy::Parallel);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn parallel_is_unavailable_without_the_feature() {
        let err = MonteCarloBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect_err("parallel must be unavailable");
        assert!(matches!(err, KansenError::BackendUnavailable { .. }));
    }

    #[test]
    fn zero_trials_are_accepted() {
        let runner = MonteCarloBuilder::new()
            .with_trials(0)
            .build()
            .expect("zero trials must be accepted");
        assert_eq!(runner.trials(), 0);
    }
}
