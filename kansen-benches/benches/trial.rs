//! Single-trial benchmarks.
//!
//! Measures one SIR trial on synthetic contact graphs of increasing size,
//! excluding graph generation and probability table construction.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use kansen_benches::{
    error::BenchSetupError,
    params::TrialBenchParams,
    source::{SyntheticConfig, generate},
};
use kansen_core::{
    EdgeProbabilityTable, SimulationEngine, SimulationParams, TransmissionParams, trial_rng,
};

/// Seed used for graph generation and trial streams.
const SEED: u64 = 42;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 1_000, 10_000];

/// Random partners drawn per node.
const EDGES_PER_NODE: usize = 4;

fn single_trial_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("single_trial");
    group.sample_size(30);

    let transmission = TransmissionParams::new(0.3, 60.0)?;
    let params = SimulationParams::new(5, 50, 2, 7);

    for &node_count in NODE_COUNTS {
        let graph = generate(&SyntheticConfig {
            node_count,
            edges_per_node: EDGES_PER_NODE,
            max_duration: 120.0,
            seed: SEED,
        })?;
        let table = EdgeProbabilityTable::from_graph(&graph, &transmission)?;
        let engine = SimulationEngine::new(&graph, &table, params)?;

        let bench_params = TrialBenchParams {
            node_count,
            edges_per_node: EDGES_PER_NODE,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(&bench_params),
            &engine,
            |b, prepared| {
                let mut trial = 0_usize;
                b.iter(|| {
                    let mut rng = trial_rng(SEED, trial);
                    trial = trial.wrapping_add(1);
                    prepared.run_trial(&mut rng)
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn single_trial(c: &mut Criterion) {
    if let Err(err) = single_trial_impl(c) {
        panic!("single_trial benchmark setup failed: {err}");
    }
}

criterion_group!(benches, single_trial);
criterion_main!(benches);
