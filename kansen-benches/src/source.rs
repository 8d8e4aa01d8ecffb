//! Synthetic contact graphs for benchmarking.
//!
//! Every node draws a fixed number of random partners, so the mean degree is
//! roughly twice `edges_per_node`. Durations are uniform in
//! `[1, max_duration]`. Generation is seeded for reproducibility across
//! benchmark runs.

use kansen_core::{ContactGraph, ContactGraphBuilder};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// The requested node count was below two.
    #[error("node count must be at least two, got {0}")]
    TooFewNodes(usize),
    /// The maximum duration was below one or not finite.
    #[error("max duration must be finite and at least 1, got {0}")]
    InvalidDuration(f64),
}

/// Configuration for synthetic contact graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
    /// Random partners drawn per node.
    pub edges_per_node: usize,
    /// Upper bound of the uniform contact duration.
    pub max_duration: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a random contact graph.
///
/// Nodes are labelled `n0`, `n1`, ... and appear in index order even when
/// they end up isolated. Self-pairs are skipped and repeated pairs overwrite
/// the earlier duration.
///
/// # Errors
/// Returns [`SyntheticError::TooFewNodes`] for fewer than two nodes and
/// [`SyntheticError::InvalidDuration`] for an unusable duration bound.
///
/// # Examples
/// ```
/// use kansen_benches::source::{SyntheticConfig, generate};
///
/// let config = SyntheticConfig { node_count: 10, edges_per_node: 2, max_duration: 30.0, seed: 7 };
/// let graph = generate(&config).expect("valid config");
/// assert_eq!(graph.node_count(), 10);
/// ```
pub fn generate(config: &SyntheticConfig) -> Result<ContactGraph, SyntheticError> {
    if config.node_count < 2 {
        return Err(SyntheticError::TooFewNodes(config.node_count));
    }
    if !config.max_duration.is_finite() || config.max_duration < 1.0 {
        return Err(SyntheticError::InvalidDuration(config.max_duration));
    }

    let labels: Vec<String> = (0..config.node_count).map(|i| format!("n{i}")).collect();
    let mut builder = ContactGraphBuilder::new();
    for label in &labels {
        builder.add_node(label);
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    for source in &labels {
        for _ in 0..config.edges_per_node {
            let Some(target) = labels.get(rng.gen_range(0..config.node_count)) else {
                continue;
            };
            if target == source {
                continue;
            }
            let duration = rng.gen_range(1.0..=config.max_duration);
            builder.add_edge(source, target, Some(duration));
        }
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config(node_count: usize, seed: u64) -> SyntheticConfig {
        SyntheticConfig {
            node_count,
            edges_per_node: 3,
            max_duration: 60.0,
            seed,
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let first = generate(&config(50, 9)).expect("valid config");
        let second = generate(&config(50, 9)).expect("valid config");
        assert_eq!(first.edges(), second.edges());
    }

    #[test]
    fn durations_stay_in_range() {
        let graph = generate(&config(200, 1)).expect("valid config");
        assert!(graph.edge_count() > 0);
        assert!(graph.edge_count() <= 600);
        for edge in graph.edges() {
            let duration = edge.duration().expect("generated edges carry durations");
            assert!((1.0..=60.0).contains(&duration));
            assert_ne!(edge.source(), edge.target());
        }
    }

    #[rstest]
    #[case::single_node(SyntheticConfig { node_count: 1, ..config(0, 0) }, SyntheticError::TooFewNodes(1))]
    #[case::short_duration(
        SyntheticConfig { max_duration: 0.5, ..config(5, 0) },
        SyntheticError::InvalidDuration(0.5)
    )]
    fn invalid_configs_are_rejected(#[case] config: SyntheticConfig, #[case] expected: SyntheticError) {
        let err = generate(&config).expect_err("config must be rejected");
        assert_eq!(err, expected);
    }
}
