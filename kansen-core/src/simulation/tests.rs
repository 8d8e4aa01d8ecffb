//! Unit and property tests for the single-trial engine.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{SimulationEngine, SimulationParams};
use crate::{
    ContactGraph, ContactGraphBuilder, EdgeProbabilityTable, KansenError, TransmissionParams,
    test_utils::{graph_from_edges, suite_proptest_config, unit_bound_table},
    trial_rng,
};

fn build_engine<'a>(
    graph: &'a ContactGraph,
    table: &'a EdgeProbabilityTable,
    params: SimulationParams,
) -> SimulationEngine<'a> {
    SimulationEngine::new(graph, table, params).expect("parameters must be valid")
}

#[rstest]
#[case::seed_0(0)]
#[case::seed_17(17)]
#[case::seed_4242(4242)]
fn certain_edge_always_infects_partner(#[case] seed: u64) {
    let graph = graph_from_edges(&[("a", "b", 10.0)]);
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 5, 0, 1));

    for trial in 0..32 {
        let outcome = engine
            .run_trial(&mut trial_rng(seed, trial))
            .expect("trial must succeed");
        assert_eq!(outcome.sample().as_slice(), &[1, 1]);
    }
}

#[test]
fn latency_delays_but_does_not_prevent_certain_infection() {
    let graph = graph_from_edges(&[("a", "b", 10.0)]);
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 10, 3, 4));

    let outcome = engine
        .run_trial(&mut trial_rng(5, 0))
        .expect("trial must succeed");
    assert_eq!(outcome.sample().as_slice(), &[1, 1]);
}

#[test]
fn zero_probability_edge_never_transmits() {
    let graph = graph_from_edges(&[("a", "b", 0.0)]);
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 20, 1, 3));

    for trial in 0..64 {
        let outcome = engine
            .run_trial(&mut trial_rng(3, trial))
            .expect("trial must succeed");
        assert_eq!(outcome.sample().infected_count(), 1);
    }
}

#[test]
fn isolated_node_stays_uninfected_without_seeds() {
    let mut builder = ContactGraphBuilder::new();
    builder.add_edge("a", "b", Some(10.0));
    builder.add_node("loner");
    let graph = builder.build();
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(0, 10, 2, 3));

    let outcome = engine
        .run_trial(&mut trial_rng(1, 0))
        .expect("trial must succeed");
    assert_eq!(outcome.sample().as_slice(), &[0, 0, 0]);
    assert_eq!(outcome.rounds(), 0);
}

#[test]
fn zero_latency_counts_every_node_as_infected() {
    let mut builder = ContactGraphBuilder::new();
    builder.add_node("x");
    builder.add_node("y");
    let graph = builder.build();
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(0, 10, 0, 3));

    let outcome = engine
        .run_trial(&mut trial_rng(1, 0))
        .expect("trial must succeed");
    assert_eq!(outcome.sample().as_slice(), &[1, 1]);
}

#[test]
fn zero_time_steps_only_records_seeds() {
    let graph = graph_from_edges(&[("a", "b", 10.0), ("b", "c", 10.0)]);
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 0, 1, 3));

    let outcome = engine
        .run_trial(&mut trial_rng(8, 0))
        .expect("trial must succeed");
    assert_eq!(outcome.sample().infected_count(), 1);
    assert_eq!(outcome.rounds(), 0);
}

#[rstest]
#[case(0, 1)]
#[case(2, 3)]
#[case(5, 6)]
fn seed_is_removed_after_infection_period(#[case] infection_period: u32, #[case] rounds: u32) {
    let mut builder = ContactGraphBuilder::new();
    builder.add_node("solo");
    let graph = builder.build();
    let table = unit_bound_table(&graph);
    let engine = build_engine(
        &graph,
        &table,
        SimulationParams::new(1, 100, 1, infection_period),
    );

    let outcome = engine
        .run_trial(&mut trial_rng(0, 0))
        .expect("trial must succeed");
    assert_eq!(outcome.rounds(), rounds);
    assert_eq!(outcome.sample().as_slice(), &[1]);
}

#[test]
fn simultaneous_exposures_each_advance_the_counter() {
    let graph = graph_from_edges(&[("x", "z", 10.0), ("y", "z", 10.0)]);
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(2, 1, 3, 5));
    let mut rng = SmallRng::seed_from_u64(0);

    let mut after_first_round = Vec::new();
    engine
        .run_from_seeds(&[0, 2], &mut rng, |_, counters| {
            after_first_round = counters.to_vec();
        })
        .expect("trial must succeed");

    // x = 0, z = 1, y = 2 in first-seen order.
    assert_eq!(after_first_round, vec![1, -1, 1]);
}

#[test]
fn promotion_is_visible_later_in_the_same_round() {
    let graph = graph_from_edges(&[("a", "b", 10.0), ("b", "c", 10.0)]);
    let table = unit_bound_table(&graph);
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 2, 1, 5));
    let mut rng = SmallRng::seed_from_u64(0);

    let mut history = Vec::new();
    engine
        .run_from_seeds(&[0], &mut rng, |round, counters| {
            history.push((round, counters.to_vec()));
        })
        .expect("trial must succeed");

    assert_eq!(history, vec![(1, vec![1, 0, -1]), (2, vec![2, 1, 0])]);
}

#[test]
fn missing_probability_entry_is_an_invariant_violation() {
    let graph = graph_from_edges(&[("a", "b", 10.0)]);
    let table = unit_bound_table(&graph)
        .without_entry(0, 1)
        .without_entry(1, 0);
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 3, 1, 1));

    let err = engine
        .run_trial(&mut trial_rng(0, 0))
        .expect_err("lookup miss must fail");
    assert!(matches!(
        err,
        KansenError::InconsistentProbabilityTable { .. }
    ));
}

#[test]
fn oversized_seed_set_is_rejected() {
    let graph = graph_from_edges(&[("a", "b", 10.0)]);
    let table = unit_bound_table(&graph);
    let err = SimulationEngine::new(&graph, &table, SimulationParams::new(3, 3, 1, 1))
        .expect_err("initial size must be bounded by node count");
    assert_eq!(
        err,
        KansenError::InvalidInitialSize {
            initial_size: 3,
            node_count: 2
        }
    );
}

#[test]
fn trials_are_reproducible_for_a_fixed_seed() {
    let graph = graph_from_edges(&[
        ("a", "b", 3.0),
        ("b", "c", 7.0),
        ("c", "d", 1.0),
        ("d", "a", 9.0),
        ("a", "c", 5.0),
    ]);
    let params = TransmissionParams::new(0.6, 10.0).expect("params must be valid");
    let table = EdgeProbabilityTable::from_graph(&graph, &params).expect("table must build");
    let engine = build_engine(&graph, &table, SimulationParams::new(1, 30, 2, 3));

    for trial in 0..16 {
        let first = engine.run_trial(&mut trial_rng(99, trial));
        let second = engine.run_trial(&mut trial_rng(99, trial));
        assert_eq!(first, second);
    }
}

fn random_graph_strategy() -> impl Strategy<Value = Vec<(u8, u8, f64)>> {
    prop::collection::vec((0_u8..16, 0_u8..16, 0.0_f64..20.0), 1..48)
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn samples_are_binary_and_counters_monotone(
        edges in random_graph_strategy(),
        bound in 0.0_f64..=1.0,
        latency in 0_u32..4,
        infection_period in 0_u32..4,
        time_steps in 0_u32..25,
        seed in any::<u64>(),
    ) {
        let mut builder = ContactGraphBuilder::new();
        for (left, right, duration) in &edges {
            builder.add_edge(&left.to_string(), &right.to_string(), Some(*duration));
        }
        let graph = builder.build();
        let table = EdgeProbabilityTable::from_graph(&graph, &TransmissionParams::new(bound, 10.0)?)?;
        let initial_size = graph.node_count().min(2);
        let params = SimulationParams::new(initial_size, time_steps, latency, infection_period);
        let engine = SimulationEngine::new(&graph, &table, params)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let seeds = rand::seq::index::sample(&mut rng, graph.node_count(), initial_size).into_vec();

        let mut previous: Vec<i64> = vec![-i64::from(latency); graph.node_count()];
        for &node in &seeds {
            previous[node] = 0;
        }
        let mut violations = Vec::new();
        let outcome = engine.run_from_seeds(&seeds, &mut rng, |round, counters| {
            for (node, (&before, &after)) in previous.iter().zip(counters).enumerate() {
                if after < before || (before >= 0 && after < 0) {
                    violations.push((round, node, before, after));
                }
            }
            previous.copy_from_slice(counters);
        })?;

        prop_assert!(violations.is_empty(), "counter regressed: {violations:?}");
        prop_assert!(outcome.rounds() <= time_steps);
        prop_assert_eq!(outcome.sample().len(), graph.node_count());
        prop_assert!(outcome.sample().as_slice().iter().all(|&flag| flag <= 1));
        for (node, &counter) in previous.iter().enumerate() {
            prop_assert_eq!(outcome.sample().is_infected(node), counter >= 0);
        }
    }
}
