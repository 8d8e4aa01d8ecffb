//! Persistence of run results.
//!
//! Writes the per-node probability vector as a NumPy `.npy` file (format
//! version 1.0, little-endian `f64`, one dimension) and the population rate
//! as a one-line text report.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use kansen_core::InfectionResult;
use thiserror::Error;
use tracing::{field, info, instrument};

/// File name of the per-node probability vector.
pub const PROBABILITIES_FILE: &str = "node_probabilities.npy";
/// File name of the infection-rate report.
pub const RATE_FILE: &str = "infection_rate.txt";

const NPY_MAGIC: &[u8] = b"\x93NUMPY";
const NPY_VERSION: [u8; 2] = [1, 0];
const NPY_ALIGNMENT: usize = 64;

/// Errors raised while persisting results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// Summaries were not computed before saving.
    #[error("results must be summarised before they are saved")]
    MissingSummaries,
    /// The NPY header does not fit the version 1.0 length field.
    #[error("npy header of {length} bytes exceeds the version 1.0 limit")]
    HeaderTooLong {
        /// Padded header length.
        length: usize,
    },
    /// Writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Locations of the files written by [`save_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedOutputs {
    /// Path of the probability vector.
    pub probabilities: PathBuf,
    /// Path of the infection-rate report.
    pub report: PathBuf,
}

/// Writes both result files into `directory`, creating it if needed.
///
/// # Errors
/// Returns [`OutputError::MissingSummaries`] when the expected values or
/// infection rate have not been calculated, and [`OutputError::Io`] when a
/// file cannot be written.
#[instrument(name = "cli.save_results", err, skip(result), fields(directory = field::Empty))]
pub fn save_results(directory: &Path, result: &InfectionResult) -> Result<SavedOutputs, OutputError> {
    tracing::Span::current().record("directory", field::display(directory.display()));
    let (Some(values), Some(rate)) = (result.expected_values(), result.infection_rate()) else {
        return Err(OutputError::MissingSummaries);
    };
    fs::create_dir_all(directory).map_err(io_error(directory))?;

    let probabilities = directory.join(PROBABILITIES_FILE);
    let header = npy_header(values.len())?;
    File::create(&probabilities)
        .and_then(|file| write_npy(BufWriter::new(file), &header, values))
        .map_err(io_error(&probabilities))?;

    let report = directory.join(RATE_FILE);
    fs::write(&report, rate_report(rate)).map_err(io_error(&report))?;

    info!(
        probabilities = %probabilities.display(),
        report = %report.display(),
        "results saved"
    );
    Ok(SavedOutputs {
        probabilities,
        report,
    })
}

/// Renders the infection-rate report line.
///
/// # Examples
/// ```
/// use kansen_cli::output::rate_report;
///
/// assert_eq!(rate_report(1.0), "Global infection rate 1.0");
/// assert_eq!(rate_report(0.375), "Global infection rate 0.375");
/// ```
#[must_use]
pub fn rate_report(rate: f64) -> String {
    format!("Global infection rate {}", format_float(rate))
}

/// Formats `value` with the shortest round-trip digits, keeping a trailing
/// `.0` on integral values and a two-digit exponent below `1e-4`.
#[must_use]
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = exponent
                    .strip_prefix('-')
                    .map_or(("+", exponent), |digits| ("-", digits));
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => formatted,
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> OutputError {
    let path = path.to_path_buf();
    move |source| OutputError::Io { path, source }
}

fn npy_header(len: usize) -> Result<Vec<u8>, OutputError> {
    let dict = format!("{{'descr': '<f8', 'fortran_order': False, 'shape': ({len},), }}");
    let prefix = NPY_MAGIC.len() + NPY_VERSION.len() + 2;
    let unpadded = prefix + dict.len() + 1;
    let padding = (NPY_ALIGNMENT - unpadded % NPY_ALIGNMENT) % NPY_ALIGNMENT;
    let header_len = dict.len() + padding + 1;
    let encoded_len =
        u16::try_from(header_len).map_err(|_| OutputError::HeaderTooLong { length: header_len })?;

    let mut header = Vec::with_capacity(prefix + header_len);
    header.extend_from_slice(NPY_MAGIC);
    header.extend_from_slice(&NPY_VERSION);
    header.extend_from_slice(&encoded_len.to_le_bytes());
    header.extend_from_slice(dict.as_bytes());
    header.resize(header.len() + padding, b' ');
    header.push(b'\n');
    Ok(header)
}

fn write_npy<W: Write>(mut writer: W, header: &[u8], values: &[f64]) -> io::Result<()> {
    writer.write_all(header)?;
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()
}
