//! Edge-list provider that assembles a [`ContactGraph`] from CSV rows.
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use kansen_core::{ContactGraph, ContactGraphBuilder};

use crate::{
    errors::EdgeListProviderError,
    record::{ColumnLayout, split_fields},
};

/// Contact graph loaded from a CSV edge list.
///
/// Rows that repeat an earlier row exactly are dropped before the graph is
/// built. Distinct rows describing the same undirected edge overwrite its
/// duration in file order.
///
/// # Examples
/// ```
/// use kansen_providers_edgelist::EdgeListProvider;
///
/// let csv = "id1,id2,duration\na,b,5\na,b,5\nb,c,\n";
/// let provider = EdgeListProvider::try_from_reader("contacts", csv.as_bytes())?;
/// assert_eq!(provider.graph().node_count(), 3);
/// assert_eq!(provider.duplicate_rows(), 1);
/// # Ok::<(), kansen_providers_edgelist::EdgeListProviderError>(())
/// ```
#[derive(Debug)]
pub struct EdgeListProvider {
    name: String,
    graph: ContactGraph,
    rows: usize,
    duplicate_rows: usize,
}

impl EdgeListProvider {
    /// Loads an edge list from a file on disk, named after the file stem.
    ///
    /// # Errors
    /// Returns [`EdgeListProviderError::Io`] when the file cannot be read and
    /// the parsing errors of [`Self::try_from_reader`] otherwise.
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, EdgeListProviderError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map_or_else(|| "edge_list".into(), |stem| stem.to_string_lossy());
        let file = File::open(path)?;
        Self::try_from_reader(name.into_owned(), BufReader::new(file))
    }

    /// Loads an edge list from any buffered reader.
    ///
    /// The first non-blank line is the header. Blank lines are skipped.
    ///
    /// # Errors
    /// Returns [`EdgeListProviderError::MissingHeader`] for empty input,
    /// [`EdgeListProviderError::ColumnNotFound`] when a required column is
    /// absent, and a row-level error naming the line for malformed rows.
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListProviderError> {
        let mut layout = None;
        let mut seen = HashSet::new();
        let mut builder = ContactGraphBuilder::new();
        let mut rows = 0_usize;
        let mut duplicate_rows = 0_usize;

        for (offset, text) in reader.lines().enumerate() {
            let text = text?;
            let line = offset + 1;
            let text = if offset == 0 {
                text.trim_start_matches('\u{feff}')
            } else {
                text.as_str()
            };
            if text.trim().is_empty() {
                continue;
            }
            let fields = split_fields(text, line)?;
            let Some(layout) = layout else {
                layout = Some(ColumnLayout::from_header(&fields)?);
                continue;
            };

            let edge = layout.edge(&fields, line)?;
            rows += 1;
            if !seen.insert(fields.clone()) {
                duplicate_rows += 1;
                continue;
            }
            builder.add_edge(edge.source, edge.target, edge.duration);
        }

        if layout.is_none() {
            return Err(EdgeListProviderError::MissingHeader);
        }
        Ok(Self {
            name: name.into(),
            graph: builder.build(),
            rows,
            duplicate_rows,
        })
    }

    /// Returns the provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded graph.
    #[must_use]
    pub fn graph(&self) -> &ContactGraph {
        &self.graph
    }

    /// Consumes the provider and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> ContactGraph {
        self.graph
    }

    /// Returns the number of data rows read, duplicates included.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of rows dropped as exact duplicates.
    #[must_use]
    pub fn duplicate_rows(&self) -> usize {
        self.duplicate_rows
    }
}
