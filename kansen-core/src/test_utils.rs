//! Shared test utilities for `kansen-core`.

use kansen_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{ContactGraph, ContactGraphBuilder, EdgeProbabilityTable, TransmissionParams};

/// Builds a proptest configuration from the shared run profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph whose edges all carry a duration.
pub(crate) fn graph_from_edges(edges: &[(&str, &str, f64)]) -> ContactGraph {
    let mut builder = ContactGraphBuilder::new();
    for &(source, target, duration) in edges {
        builder.add_edge(source, target, Some(duration));
    }
    builder.build()
}

/// Probability table with `a_max = 1` and `max_duration = 10`, so a
/// duration of 10 transmits with certainty and 0 never transmits.
pub(crate) fn unit_bound_table(graph: &ContactGraph) -> EdgeProbabilityTable {
    let params = TransmissionParams::new(1.0, 10.0).expect("unit bound parameters are valid");
    EdgeProbabilityTable::from_graph(graph, &params).expect("test graphs carry durations")
}
