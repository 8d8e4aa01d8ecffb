//! Command implementations and argument parsing for the kansen CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use kansen_core::{
    ContactGraph, EdgeProbabilityTable, ExecutionStrategy, KansenError, MonteCarloBuilder,
};
use kansen_providers_edgelist::{EdgeListProvider, EdgeListProviderError};
use kansen_providers_gexf::{GexfProvider, GexfProviderError};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

use crate::config::{ConfigError, InputType, SimulationConfig};
use crate::output::{OutputError, SavedOutputs, format_float, save_results};
use crate::progress::ProgressObserver;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "kansen",
    about = "Estimate per-node infection probabilities on a contact graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the Monte Carlo simulation described by a configuration file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the `name=value` configuration file.
    #[arg(long, short)]
    pub config: PathBuf,

    /// Base seed for the per-trial random streams (overrides `seed`).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distribute trials across the rayon thread pool.
    #[arg(long)]
    pub parallel: bool,

    /// Directory receiving the result files (overrides `output_path`).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// The configuration file could not be read or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Edge-list ingestion failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListProviderError),
    /// GEXF ingestion failed.
    #[error(transparent)]
    Gexf(#[from] GexfProviderError),
    /// Model construction or simulation failed.
    #[error(transparent)]
    Core(#[from] KansenError),
    /// Result files could not be written.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Graph file the simulation ran on.
    pub graph_source: PathBuf,
    /// Number of nodes in the contact graph.
    pub nodes: usize,
    /// Number of undirected edges in the contact graph.
    pub edges: usize,
    /// Number of trials executed.
    pub trials: usize,
    /// Mean per-node infection probability.
    pub infection_rate: f64,
    /// Files written by the run.
    pub outputs: SavedOutputs,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration, ingestion, simulation, or
/// persistence fails.
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        config = field::Empty,
        input_type = field::Empty,
        trials = field::Empty,
        seed = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("config", field::display(command.config.display()));

    let mut config = SimulationConfig::from_path(&command.config)?;
    if let Some(seed) = command.seed {
        config.seed = seed;
    }
    if let Some(output) = command.output {
        config.output_path = output;
    }
    span.record("input_type", field::display(config.input_type.as_str()));
    span.record("trials", config.iter);
    span.record("seed", config.seed);

    let transmission = config.transmission_params()?;
    let strategy = if command.parallel {
        ExecutionStrategy::Parallel
    } else {
        ExecutionStrategy::Sequential
    };
    let runner = MonteCarloBuilder::new()
        .with_trials(config.iter)
        .with_seed(config.seed)
        .with_execution_strategy(strategy)
        .build()?;

    let graph_source = config.graph_path();
    let graph = load_graph(config.input_type, &graph_source)?;
    let table = EdgeProbabilityTable::from_graph(&graph, &transmission)?;
    let observer = ProgressObserver::new(config.progress_interval);
    let result = runner.run(&graph, &table, config.simulation_params(), &observer)?;
    let outputs = save_results(&config.output_path, &result)?;

    let summary = ExecutionSummary {
        graph_source,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        trials: result.trial_count(),
        infection_rate: result.infection_rate().unwrap_or_default(),
        outputs,
    };
    info!(
        nodes = summary.nodes,
        trials = summary.trials,
        infection_rate = summary.infection_rate,
        "simulation completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.load_graph",
    err,
    fields(path = %path.display(), nodes = field::Empty, edges = field::Empty),
)]
fn load_graph(input_type: InputType, path: &Path) -> Result<ContactGraph, CliError> {
    let graph = match input_type {
        InputType::EdgeList => {
            let provider = EdgeListProvider::try_from_path(path)?;
            debug!(
                rows = provider.rows(),
                duplicate_rows = provider.duplicate_rows(),
                "edge list read"
            );
            provider.into_graph()
        }
        InputType::Gexf => {
            let provider = GexfProvider::try_from_path(path)?;
            debug!(
                edge_elements = provider.edge_elements(),
                declared_directed = provider.declared_directed(),
                "gexf document read"
            );
            provider.into_graph()
        }
    };
    let span = Span::current();
    span.record("nodes", graph.node_count());
    span.record("edges", graph.edge_count());
    Ok(graph)
}

/// Writes a human-readable summary to `writer`.
///
/// # Errors
/// Propagates failures from `writer`.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph: {}", summary.graph_source.display())?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "trials: {}", summary.trials)?;
    writeln!(
        writer,
        "infection rate: {}",
        format_float(summary.infection_rate)
    )?;
    writeln!(
        writer,
        "probabilities: {}",
        summary.outputs.probabilities.display()
    )?;
    writeln!(writer, "report: {}", summary.outputs.report.display())?;
    Ok(())
}
