//! Kansen core library: Monte Carlo estimation of per-node infection
//! probabilities on weighted contact graphs.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod graph;
mod monte_carlo;
mod probability;
mod result;
mod sample;
mod seed;
mod simulation;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{ExecutionStrategy, MonteCarloBuilder},
    error::{AggregateError, AggregateErrorCode, KansenError, KansenErrorCode, Result},
    graph::{ContactEdge, ContactGraph, ContactGraphBuilder},
    monte_carlo::{MonteCarlo, NoopObserver, TrialObserver},
    probability::{EdgeProbabilityTable, TransmissionParams},
    result::InfectionResult,
    sample::Sample,
    seed::{mix_trial_seed, trial_rng},
    simulation::{SimulationEngine, SimulationParams, TrialOutcome},
};
