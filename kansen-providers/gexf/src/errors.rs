use thiserror::Error;

/// Failures raised while reading a GEXF document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GexfProviderError {
    /// The document has no `<gexf>` root element.
    #[error("document is not GEXF: no <gexf> root element")]
    NotGexf,
    /// A required XML attribute is absent.
    #[error("<{element}> element is missing the `{attribute}` attribute")]
    MissingAttribute {
        /// Element name.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },
    /// A duration value is not a number.
    #[error("edge `{edge}` has invalid duration `{value}`")]
    InvalidDuration {
        /// Edge endpoints rendered as `source - target`.
        edge: String,
        /// Offending value.
        value: String,
    },
    /// The document ended inside an `<edge>` element.
    #[error("document ended inside an <edge> element")]
    UnterminatedEdge,
    /// The XML itself is malformed.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
