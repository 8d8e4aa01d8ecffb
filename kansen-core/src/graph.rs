//! Undirected contact graph with per-edge contact durations.
//!
//! Node labels are interned into dense indices in first-seen order. That
//! order is shared by every sample, by the expected-value vector, and by any
//! persisted output, so callers can map results back to labels through
//! [`ContactGraph::label`].

use std::{collections::HashMap, sync::Arc};

/// An undirected edge between two node indices.
///
/// `duration` is `None` when the input did not carry a contact duration; the
/// probability model rejects such edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEdge {
    source: usize,
    target: usize,
    duration: Option<f64>,
}

impl ContactEdge {
    /// Returns the index of the endpoint that was inserted first.
    #[rustfmt::skip]
    #[must_use]
    pub fn source(&self) -> usize { self.source }

    /// Returns the index of the other endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn target(&self) -> usize { self.target }

    /// Returns the contact duration, if the input supplied one.
    #[rustfmt::skip]
    #[must_use]
    pub fn duration(&self) -> Option<f64> { self.duration }
}

/// Immutable contact graph shared read-only by every trial.
///
/// # Examples
/// ```
/// use kansen_core::ContactGraphBuilder;
///
/// let mut builder = ContactGraphBuilder::new();
/// builder.add_edge("a", "b", Some(10.0));
/// builder.add_node("isolated");
/// let graph = builder.build();
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.neighbours(0), &[1]);
/// assert!(graph.neighbours(2).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ContactGraph {
    labels: Vec<Arc<str>>,
    index: HashMap<Arc<str>, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<ContactEdge>,
}

impl ContactGraph {
    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label of `index`, or `None` when out of bounds.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(AsRef::as_ref)
    }

    /// Returns every label in index order.
    #[must_use]
    pub fn labels(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// Resolves a label to its node index.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Returns the neighbours of `index` in ascending index order.
    ///
    /// Out-of-bounds indices yield an empty slice.
    #[must_use]
    pub fn neighbours(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    /// Returns each undirected edge once, in first-insertion order.
    #[must_use]
    pub fn edges(&self) -> &[ContactEdge] {
        &self.edges
    }

    pub(crate) fn shared_label(&self, index: usize) -> Arc<str> {
        self.labels
            .get(index)
            .map_or_else(|| Arc::from(index.to_string()), Arc::clone)
    }
}

/// Incrementally assembles a [`ContactGraph`].
///
/// Adding an edge that already exists (in either orientation) replaces its
/// duration, mirroring how repeated rows overwrite attributes in the input
/// formats.
#[derive(Debug, Default)]
pub struct ContactGraphBuilder {
    labels: Vec<Arc<str>>,
    index: HashMap<Arc<str>, usize>,
    edge_slots: HashMap<(usize, usize), usize>,
    edges: Vec<ContactEdge>,
}

impl ContactGraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `label` if it is new and returns its node index.
    pub fn add_node(&mut self, label: &str) -> usize {
        if let Some(&existing) = self.index.get(label) {
            return existing;
        }
        let shared: Arc<str> = Arc::from(label);
        let slot = self.labels.len();
        self.labels.push(Arc::clone(&shared));
        self.index.insert(shared, slot);
        slot
    }

    /// Inserts an undirected edge, creating missing endpoints.
    ///
    /// # Examples
    /// ```
    /// use kansen_core::ContactGraphBuilder;
    ///
    /// let mut builder = ContactGraphBuilder::new();
    /// builder.add_edge("a", "b", Some(1.0));
    /// builder.add_edge("b", "a", Some(4.0));
    /// let graph = builder.build();
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.edges()[0].duration(), Some(4.0));
    /// ```
    pub fn add_edge(&mut self, source: &str, target: &str, duration: Option<f64>) {
        let left = self.add_node(source);
        let right = self.add_node(target);
        let key = (left.min(right), left.max(right));
        if let Some(&slot) = self.edge_slots.get(&key) {
            if let Some(edge) = self.edges.get_mut(slot) {
                edge.duration = duration;
            }
            return;
        }
        self.edge_slots.insert(key, self.edges.len());
        self.edges.push(ContactEdge {
            source: left,
            target: right,
            duration,
        });
    }

    /// Returns the number of nodes inserted so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Freezes the builder into an immutable graph.
    #[must_use]
    pub fn build(self) -> ContactGraph {
        let mut adjacency = vec![Vec::new(); self.labels.len()];
        for edge in &self.edges {
            if let Some(list) = adjacency.get_mut(edge.source) {
                list.push(edge.target);
            }
            if edge.source != edge.target {
                if let Some(list) = adjacency.get_mut(edge.target) {
                    list.push(edge.source);
                }
            }
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        ContactGraph {
            labels: self.labels,
            index: self.index,
            adjacency,
            edges: self.edges,
        }
    }
}
