//! Benchmark parameter types.
//!
//! Each type renders as the Criterion benchmark id.

use std::fmt;

use kansen_core::ExecutionStrategy;

/// Parameters for a single-trial benchmark.
#[derive(Clone, Debug)]
pub struct TrialBenchParams {
    /// Number of nodes in the contact graph.
    pub node_count: usize,
    /// Partners drawn per node when generating edges.
    pub edges_per_node: usize,
}

impl fmt::Display for TrialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.node_count, self.edges_per_node)
    }
}

/// Parameters for a Monte Carlo run benchmark.
#[derive(Clone, Debug)]
pub struct RunBenchParams {
    /// Number of nodes in the contact graph.
    pub node_count: usize,
    /// Number of trials per run.
    pub trials: usize,
    /// How trials are scheduled.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for RunBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},trials={},{:?}",
            self.node_count, self.trials, self.strategy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_compact() {
        let trial = TrialBenchParams {
            node_count: 500,
            edges_per_node: 4,
        };
        assert_eq!(trial.to_string(), "n=500,k=4");
        let run = RunBenchParams {
            node_count: 100,
            trials: 50,
            strategy: ExecutionStrategy::Sequential,
        };
        assert_eq!(run.to_string(), "n=100,trials=50,Sequential");
    }
}
