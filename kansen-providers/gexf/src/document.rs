//! Streaming GEXF decoding into a [`ContactGraphBuilder`].

use std::collections::HashSet;

use kansen_core::{ContactGraph, ContactGraphBuilder};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::errors::GexfProviderError;

const DURATION: &str = "duration";

/// Graph plus the counts observed while decoding.
#[derive(Debug)]
pub(crate) struct ParsedDocument {
    pub(crate) graph: ContactGraph,
    pub(crate) edge_elements: usize,
    pub(crate) directed: bool,
}

#[derive(Debug)]
struct PendingEdge {
    source: String,
    target: String,
    duration: Option<f64>,
}

impl PendingEdge {
    fn from_element(element: &BytesStart<'_>) -> Result<Self, GexfProviderError> {
        let source = required(element, "edge", "source")?;
        let target = required(element, "edge", "target")?;
        let mut edge = Self {
            source,
            target,
            duration: None,
        };
        if let Some(raw) = attribute(element, DURATION)? {
            edge.set_duration(&raw)?;
        }
        Ok(edge)
    }

    fn set_duration(&mut self, raw: &str) -> Result<(), GexfProviderError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| GexfProviderError::InvalidDuration {
                edge: format!("{} - {}", self.source, self.target),
                value: raw.to_owned(),
            })?;
        self.duration = Some(value);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Decoder {
    builder: ContactGraphBuilder,
    saw_root: bool,
    directed: bool,
    in_edge_attributes: bool,
    duration_keys: HashSet<String>,
    pending: Option<PendingEdge>,
    edge_elements: usize,
}

impl Decoder {
    fn open(&mut self, element: &BytesStart<'_>, empty: bool) -> Result<(), GexfProviderError> {
        match element.local_name().as_ref() {
            b"gexf" => self.saw_root = true,
            b"graph" => {
                self.directed = attribute(element, "defaultedgetype")?
                    .is_some_and(|kind| kind == "directed");
            }
            b"attributes" => {
                self.in_edge_attributes = !empty
                    && attribute(element, "class")?.is_some_and(|class| class == "edge");
            }
            b"attribute" if self.in_edge_attributes => {
                let id = required(element, "attribute", "id")?;
                let title = attribute(element, "title")?;
                if id == DURATION || title.as_deref() == Some(DURATION) {
                    self.duration_keys.insert(id);
                }
            }
            b"node" if self.pending.is_none() => {
                self.builder.add_node(&required(element, "node", "id")?);
            }
            b"edge" => {
                let edge = PendingEdge::from_element(element)?;
                self.edge_elements += 1;
                if empty {
                    self.commit(edge);
                } else {
                    self.pending = Some(edge);
                }
            }
            b"attvalue" => {
                if let Some(edge) = self.pending.as_mut() {
                    let key = required(element, "attvalue", "for")?;
                    if self.duration_keys.contains(&key) {
                        edge.set_duration(&required(element, "attvalue", "value")?)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"attributes" => self.in_edge_attributes = false,
            b"edge" => {
                if let Some(edge) = self.pending.take() {
                    self.commit(edge);
                }
            }
            _ => {}
        }
    }

    fn commit(&mut self, edge: PendingEdge) {
        self.builder
            .add_edge(&edge.source, &edge.target, edge.duration);
    }

    fn finish(self) -> Result<ParsedDocument, GexfProviderError> {
        if !self.saw_root {
            return Err(GexfProviderError::NotGexf);
        }
        if self.pending.is_some() {
            return Err(GexfProviderError::UnterminatedEdge);
        }
        Ok(ParsedDocument {
            graph: self.builder.build(),
            edge_elements: self.edge_elements,
            directed: self.directed,
        })
    }
}

/// Decodes a complete GEXF document.
pub(crate) fn parse(text: &str) -> Result<ParsedDocument, GexfProviderError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut decoder = Decoder::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => decoder.open(&element, false)?,
            Event::Empty(element) => decoder.open(&element, true)?,
            Event::End(element) => decoder.close(element.local_name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
    }
    decoder.finish()
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, GexfProviderError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key.as_bytes() {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required(
    element: &BytesStart<'_>,
    element_name: &'static str,
    key: &'static str,
) -> Result<String, GexfProviderError> {
    attribute(element, key)?.ok_or(GexfProviderError::MissingAttribute {
        element: element_name,
        attribute: key,
    })
}
