//! GEXF provider exposing the decoded [`ContactGraph`].
use std::{fs, path::Path};

use kansen_core::ContactGraph;

use crate::{document, errors::GexfProviderError};

/// Contact graph loaded from a GEXF document.
///
/// Edges are always treated as undirected; [`Self::declared_directed`]
/// reports whether the document claimed otherwise.
///
/// # Examples
/// ```
/// use kansen_providers_gexf::GexfProvider;
///
/// let text = r#"<gexf version="1.3"><graph>
///   <nodes><node id="a"/><node id="b"/><node id="c"/></nodes>
///   <edges><edge source="a" target="b" duration="30"/></edges>
/// </graph></gexf>"#;
/// let provider = GexfProvider::try_from_str("ward", text)?;
/// assert_eq!(provider.graph().node_count(), 3);
/// assert_eq!(provider.graph().edges()[0].duration(), Some(30.0));
/// # Ok::<(), kansen_providers_gexf::GexfProviderError>(())
/// ```
#[derive(Debug)]
pub struct GexfProvider {
    name: String,
    graph: ContactGraph,
    edge_elements: usize,
    declared_directed: bool,
}

impl GexfProvider {
    /// Loads a GEXF document from disk, named after the file stem.
    ///
    /// # Errors
    /// Returns [`GexfProviderError::Io`] when the file cannot be read and the
    /// decoding errors of [`Self::try_from_str`] otherwise.
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, GexfProviderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map_or_else(|| "graph".to_owned(), |stem| stem.to_string_lossy().into_owned());
        Self::try_from_str(name, &text)
    }

    /// Decodes a GEXF document held in memory.
    ///
    /// # Errors
    /// Returns [`GexfProviderError::Xml`] for malformed XML,
    /// [`GexfProviderError::NotGexf`] when the root element is missing,
    /// [`GexfProviderError::MissingAttribute`] for nodes or edges without
    /// identifiers, and [`GexfProviderError::InvalidDuration`] for
    /// non-numeric durations.
    pub fn try_from_str(name: impl Into<String>, text: &str) -> Result<Self, GexfProviderError> {
        let parsed = document::parse(text)?;
        Ok(Self {
            name: name.into(),
            graph: parsed.graph,
            edge_elements: parsed.edge_elements,
            declared_directed: parsed.directed,
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

    /// Returns the number of `<edge>` elements read, including repeats.
    #[must_use]
    pub fn edge_elements(&self) -> usize {
        self.edge_elements
    }

    /// Returns whether the document declared `defaultedgetype="directed"`.
    #[must_use]
    pub fn declared_directed(&self) -> bool {
        self.declared_directed
    }
}
