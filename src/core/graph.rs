//! De Bruijn Multigraph Data Model
//! ==============================
//!
//! Nodes are (k-1)-mer labels; edges are k-mers. A node's index in
//! `DiGraph::nodes` is its only identity once the graph is built, and parallel
//! edges (repeated k-mers) are stored as repeated target indices in the
//! outgoing list of the source node.

use crate::utils::errors::AssemblyError;
use crate::Result;

/// An ordered walk through a graph, expressed as node indices
pub type NodePath = Vec<usize>;

/// A single (k-1)-mer node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    outgoing: Vec<usize>,
    incoming: usize,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outgoing: Vec::new(),
            incoming: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Outgoing edge targets; a target repeats once per parallel edge
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    pub fn in_degree(&self) -> usize {
        self.incoming
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// `out - in` as a signed value
    pub fn degree_balance(&self) -> i64 {
        self.outgoing.len() as i64 - self.incoming as i64
    }

    pub(crate) fn into_label(self) -> String {
        self.label
    }
}

/// Directed multigraph over (k-1)-mer nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiGraph {
    nodes: Vec<Node>,
}

impl DiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Total number of edges, i.e. the number of k-mers consumed
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::out_degree).sum()
    }

    /// Append a node and return its index. Label uniqueness is the caller's job.
    pub fn add_node(&mut self, label: impl Into<String>) -> usize {
        self.nodes.push(Node::new(label));
        self.nodes.len() - 1
    }

    /// Add one edge `from -> to`
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.nodes.len();
        if from >= len || to >= len {
            return Err(AssemblyError::invalid(format!(
                "edge {from} -> {to} references a node outside 0..{len}"
            )));
        }
        self.nodes[from].outgoing.push(to);
        self.nodes[to].incoming += 1;
        Ok(())
    }

    /// Index of the node carrying `label`, found by linear scan
    pub fn position(&self, label: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.label == label)
    }

    /// Every edge as a `(from, to)` pair, parallel edges repeated
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(from, node)| node.outgoing.iter().map(move |&to| (from, to)))
    }

    /// True when every node has `out == in`
    pub fn is_balanced(&self) -> bool {
        self.nodes.iter().all(|node| node.degree_balance() == 0)
    }

    /// Check that labels are unique, every target is in range and every
    /// incoming count matches the number of edges that point at the node.
    pub fn validate(&self) -> Result<()> {
        let mut seen = ahash::AHashSet::with_capacity(self.nodes.len());
        let mut observed_incoming = vec![0usize; self.nodes.len()];

        for (index, node) in self.nodes.iter().enumerate() {
            if !seen.insert(node.label.as_str()) {
                return Err(AssemblyError::internal(format!(
                    "duplicate node label '{}' at index {index}",
                    node.label
                )));
            }
            for &target in &node.outgoing {
                let slot = observed_incoming.get_mut(target).ok_or_else(|| {
                    AssemblyError::internal(format!(
                        "node {index} has edge to missing node {target}"
                    ))
                })?;
                *slot += 1;
            }
        }

        for (index, (node, observed)) in self.nodes.iter().zip(&observed_incoming).enumerate() {
            if node.incoming != *observed {
                return Err(AssemblyError::internal(format!(
                    "node {index} records {} incoming edges but {observed} point at it",
                    node.incoming
                )));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn push_outgoing(&mut self, from: usize, to: usize) {
        self.nodes[from].outgoing.push(to);
        self.nodes[to].incoming += 1;
    }

    pub(crate) fn into_labels(self) -> Vec<String> {
        self.nodes.into_iter().map(Node::into_label).collect()
    }
}

/// Anything that can resolve a node index to its label
pub trait LabelLookup {
    fn label(&self, index: usize) -> Option<&str>;
}

impl LabelLookup for DiGraph {
    fn label(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(Node::label)
    }
}

impl LabelLookup for [String] {
    fn label(&self, index: usize) -> Option<&str> {
        self.get(index).map(String::as_str)
    }
}

impl LabelLookup for Vec<String> {
    fn label(&self, index: usize) -> Option<&str> {
        self.as_slice().label(index)
    }
}
