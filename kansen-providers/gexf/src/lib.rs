//! Contact-graph provider for GEXF documents.
//!
//! Nodes come from `<node>` elements in document order and edges from
//! `<edge>` elements. Contact durations are read from edge attribute values
//! declared with the title `duration`, or from a `duration` XML attribute on
//! the edge itself.

mod document;
mod errors;
mod provider;

pub use errors::GexfProviderError;
pub use provider::GexfProvider;
