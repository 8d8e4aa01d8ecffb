//! Simulation configuration files.
//!
//! A configuration file holds one `name=value` pair per line. Surrounding
//! whitespace is ignored, as are blank lines and lines starting with `#`.
//! Every key is validated once here so the rest of the pipeline works with
//! typed values.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use kansen_core::{KansenError, SimulationParams, TransmissionParams};
use thiserror::Error;

const DEFAULT_SEED: u64 = 0;
const DEFAULT_PROGRESS_INTERVAL_SECS: u64 = 3600;
const EDGE_LIST_FILE: &str = "edge_list.csv";
const GEXF_FILE: &str = "graph.gexf";

/// Recognised configuration keys.
const REQUIRED_KEYS: [&str; 10] = [
    "input_type",
    "input_path",
    "output_path",
    "probability_upper_bound",
    "max_duration",
    "iter",
    "initial_size",
    "time_steps",
    "latency_period",
    "infection_period",
];
const OPTIONAL_KEYS: [&str; 2] = ["seed", "progress_interval_secs"];

/// Errors raised while reading or validating a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A non-comment line has no `=`.
    #[error("line {line}: expected `name=value`")]
    MissingSeparator {
        /// One-based line number.
        line: usize,
    },
    /// The key is not recognised.
    #[error("line {line}: unknown key `{key}`")]
    UnknownKey {
        /// One-based line number.
        line: usize,
        /// Offending key.
        key: String,
    },
    /// The key was already set on an earlier line.
    #[error("line {line}: duplicate key `{key}` (first set on line {first})")]
    DuplicateKey {
        /// One-based line number of the repeat.
        line: usize,
        /// Line on which the key was first set.
        first: usize,
        /// Repeated key.
        key: &'static str,
    },
    /// A required key was never set.
    #[error("missing required key `{key}`")]
    MissingKey {
        /// Absent key.
        key: &'static str,
    },
    /// A value could not be parsed into the key's type.
    #[error("line {line}: invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        /// One-based line number.
        line: usize,
        /// Key whose value was rejected.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure description.
        reason: String,
    },
}

/// Graph input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// `edge_list.csv` with `id1`, `id2`, and `duration` columns.
    EdgeList,
    /// `graph.gexf`.
    Gexf,
}

impl InputType {
    /// Returns the file name read from the input directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::EdgeList => EDGE_LIST_FILE,
            Self::Gexf => GEXF_FILE,
        }
    }

    /// Returns the configuration spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EdgeList => "edge_list",
            Self::Gexf => "gexf",
        }
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "edge_list" => Ok(Self::EdgeList),
            "gexf" => Ok(Self::Gexf),
            _ => Err("expected `edge_list` or `gexf`".to_owned()),
        }
    }
}

/// Validated simulation configuration.
///
/// # Examples
/// ```
/// use kansen_cli::config::{InputType, SimulationConfig};
///
/// let config: SimulationConfig = "
/// input_type=edge_list
/// input_path=data
/// output_path=out
/// probability_upper_bound=0.5
/// max_duration=60
/// iter=100
/// initial_size=1
/// time_steps=30
/// latency_period=2
/// infection_period=5
/// "
/// .parse()?;
/// assert_eq!(config.input_type, InputType::EdgeList);
/// assert_eq!(config.graph_path(), std::path::Path::new("data/edge_list.csv"));
/// assert_eq!(config.seed, 0);
/// # Ok::<(), kansen_cli::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Graph input format.
    pub input_type: InputType,
    /// Directory holding the graph file.
    pub input_path: PathBuf,
    /// Directory receiving the result files.
    pub output_path: PathBuf,
    /// Largest per-edge transmission probability.
    pub probability_upper_bound: f64,
    /// Duration at which an edge reaches the upper bound.
    pub max_duration: f64,
    /// Number of trials.
    pub iter: usize,
    /// Number of nodes seeded as infectious per trial.
    pub initial_size: usize,
    /// Round budget per trial.
    pub time_steps: u32,
    /// Counter steps a node spends dormant.
    pub latency_period: u32,
    /// Last counter value at which a node is infectious.
    pub infection_period: u32,
    /// Base seed for per-trial random streams.
    pub seed: u64,
    /// Interval between progress reports.
    pub progress_interval: Duration,
}

impl SimulationConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read and the
    /// validation errors of [`str::parse`] otherwise.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Returns the graph file inside [`Self::input_path`].
    #[must_use]
    pub fn graph_path(&self) -> PathBuf {
        self.input_path.join(self.input_type.file_name())
    }

    /// Builds the validated transmission parameters.
    ///
    /// # Errors
    /// Returns [`KansenError::InvalidModelInput`] when the bound or duration
    /// is out of range.
    pub fn transmission_params(&self) -> Result<TransmissionParams, KansenError> {
        TransmissionParams::new(self.probability_upper_bound, self.max_duration)
    }

    /// Returns the per-trial parameters.
    #[must_use]
    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams::new(
            self.initial_size,
            self.time_steps,
            self.latency_period,
            self.infection_period,
        )
    }
}

impl FromStr for SimulationConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let entries = Entries::collect(text)?;
        Ok(Self {
            input_type: entries.required("input_type")?,
            input_path: entries.required("input_path")?,
            output_path: entries.required("output_path")?,
            probability_upper_bound: entries.required("probability_upper_bound")?,
            max_duration: entries.required("max_duration")?,
            iter: entries.required("iter")?,
            initial_size: entries.required("initial_size")?,
            time_steps: entries.required("time_steps")?,
            latency_period: entries.required("latency_period")?,
            infection_period: entries.required("infection_period")?,
            seed: entries.optional("seed")?.unwrap_or(DEFAULT_SEED),
            progress_interval: Duration::from_secs(
                entries
                    .optional("progress_interval_secs")?
                    .unwrap_or(DEFAULT_PROGRESS_INTERVAL_SECS),
            ),
        })
    }
}

struct Entry<'a> {
    line: usize,
    value: &'a str,
}

struct Entries<'a>(HashMap<&'static str, Entry<'a>>);

impl<'a> Entries<'a> {
    fn collect(text: &'a str) -> Result<Self, ConfigError> {
        let mut entries: HashMap<&'static str, Entry<'a>> = HashMap::new();
        for (offset, raw) in text.lines().enumerate() {
            let line = offset + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (name, value) = trimmed
                .split_once('=')
                .ok_or(ConfigError::MissingSeparator { line })?;
            let name = name.trim();
            let key = REQUIRED_KEYS
                .iter()
                .chain(&OPTIONAL_KEYS)
                .copied()
                .find(|known| *known == name)
                .ok_or_else(|| ConfigError::UnknownKey {
                    line,
                    key: name.to_owned(),
                })?;
            if let Some(first) = entries.get(key) {
                return Err(ConfigError::DuplicateKey {
                    line,
                    first: first.line,
                    key,
                });
            }
            entries.insert(
                key,
                Entry {
                    line,
                    value: value.trim(),
                },
            );
        }
        Ok(Self(entries))
    }

    fn required<T>(&self, key: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        self.optional(key)?.ok_or(ConfigError::MissingKey { key })
    }

    fn optional<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        let Some(entry) = self.0.get(key) else {
            return Ok(None);
        };
        entry
            .value
            .parse()
            .map(Some)
            .map_err(|error: T::Err| ConfigError::InvalidValue {
                line: entry.line,
                key,
                value: entry.value.to_owned(),
                reason: error.to_string(),
            })
    }
}
