//! Degree analysis: decides whether a graph can carry an Eulerian path
//!
//! Each node is classified by `out - in`:
//! - `0`  balanced
//! - `+1` surplus-out (path start)
//! - `-1` surplus-in (path end)
//! - anything else disqualifies the graph
//!
//! Degree balance alone does not guarantee a path: two balanced cycles with no
//! shared node pass the degree test but cannot be walked in one pass. Use
//! [`has_eulerian_path`] to also require weak connectivity.

use petgraph::unionfind::UnionFind;
use tracing::debug;

use crate::core::graph::DiGraph;

/// Shape of the graph as far as Eulerian walks are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerianPathType {
    /// Every node balanced: an Eulerian circuit candidate
    Circuit,
    /// Exactly one surplus-out and one surplus-in node
    Path { source: usize, sink: usize },
    /// Degree test failed
    None,
}

/// Per-graph degree summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeReport {
    /// Nodes with `out == in + 1`
    pub sources: Vec<usize>,
    /// Nodes with `in == out + 1`
    pub sinks: Vec<usize>,
    /// Nodes with `|out - in| >= 2`
    pub unbalanced: Vec<usize>,
}

impl DegreeReport {
    pub fn analyze(graph: &DiGraph) -> Self {
        let mut report = DegreeReport::default();
        for (index, node) in graph.nodes().iter().enumerate() {
            match node.degree_balance() {
                0 => {}
                1 => report.sources.push(index),
                -1 => report.sinks.push(index),
                _ => report.unbalanced.push(index),
            }
        }
        report
    }

    /// At most one source, at most one sink, no disqualifying node
    pub fn is_assemblable(&self) -> bool {
        self.sources.len() <= 1 && self.sinks.len() <= 1 && self.unbalanced.is_empty()
    }

    pub fn path_type(&self) -> EulerianPathType {
        if !self.is_assemblable() {
            return EulerianPathType::None;
        }
        match (self.sources.first(), self.sinks.first()) {
            (None, None) => EulerianPathType::Circuit,
            (Some(&source), Some(&sink)) => EulerianPathType::Path { source, sink },
            // A lone source or sink means the degree sums disagree
            _ => EulerianPathType::None,
        }
    }

    /// Why the degree test failed, if it did
    pub fn failure_reason(&self) -> Option<String> {
        if let Some(&node) = self.unbalanced.first() {
            return Some(format!(
                "{} node(s) differ in in/out degree by 2 or more (first: node {node})",
                self.unbalanced.len()
            ));
        }
        if self.sources.len() > 1 {
            return Some(format!(
                "{} nodes have one more outgoing than incoming edge",
                self.sources.len()
            ));
        }
        if self.sinks.len() > 1 {
            return Some(format!(
                "{} nodes have one more incoming than outgoing edge",
                self.sinks.len()
            ));
        }
        None
    }
}

/// Degree-only existence test
pub fn is_assemblable(graph: &DiGraph) -> bool {
    DegreeReport::analyze(graph).is_assemblable()
}

/// True when all nodes that carry an edge lie in one component, ignoring direction
pub fn is_weakly_connected(graph: &DiGraph) -> bool {
    let mut components = UnionFind::<usize>::new(graph.len());
    for (from, to) in graph.edges() {
        components.union(from, to);
    }

    let mut touched = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.out_degree() + node.in_degree() > 0)
        .map(|(index, _)| components.find(index));

    match touched.next() {
        Some(root) => touched.all(|other| other == root),
        None => true,
    }
}

/// Degree test plus weak connectivity
pub fn has_eulerian_path(graph: &DiGraph) -> bool {
    let report = DegreeReport::analyze(graph);
    let connected = is_weakly_connected(graph);
    debug!(
        "Degree check: {} source(s), {} sink(s), {} unbalanced, connected={}",
        report.sources.len(),
        report.sinks.len(),
        report.unbalanced.len(),
        connected
    );
    report.is_assemblable() && connected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from_edges(labels: &[&str], edges: &[(usize, usize)]) -> DiGraph {
        let mut graph = DiGraph::new();
        for label in labels {
            graph.add_node(*label);
        }
        for &(from, to) in edges {
            graph.add_edge(from, to).unwrap();
        }
        graph
    }

    #[test]
    fn test_balanced_graph_is_circuit() {
        let graph = graph_from_edges(&["aa"], &[(0, 0), (0, 0)]);
        let report = DegreeReport::analyze(&graph);
        assert!(report.is_assemblable());
        assert_eq!(report.path_type(), EulerianPathType::Circuit);
    }

    #[test]
    fn test_single_source_and_sink() {
        // A -> B, B -> A, A -> B
        let graph = graph_from_edges(&["A", "B"], &[(0, 1), (1, 0), (0, 1)]);
        let report = DegreeReport::analyze(&graph);
        assert_eq!(report.path_type(), EulerianPathType::Path { source: 0, sink: 1 });
        assert!(is_assemblable(&graph));
        assert!(has_eulerian_path(&graph));
    }

    #[test]
    fn test_two_sources_fail() {
        // A -> B, C -> D
        let graph = graph_from_edges(&["A", "B", "C", "D"], &[(0, 1), (2, 3)]);
        let report = DegreeReport::analyze(&graph);
        assert_eq!(report.sources, vec![0, 2]);
        assert_eq!(report.sinks, vec![1, 3]);
        assert!(!report.is_assemblable());
        assert_eq!(report.path_type(), EulerianPathType::None);
        assert!(report.failure_reason().unwrap().contains("more outgoing"));
    }

    #[test]
    fn test_degree_gap_of_two_fails() {
        // A -> B twice
        let graph = graph_from_edges(&["A", "B"], &[(0, 1), (0, 1)]);
        assert!(!is_assemblable(&graph));
        assert!(DegreeReport::analyze(&graph)
            .failure_reason()
            .unwrap()
            .contains("by 2 or more"));
    }

    #[test]
    fn test_disjoint_cycles_pass_degree_but_not_connectivity() {
        let graph = graph_from_edges(&["A", "B", "C", "D"], &[(0, 1), (1, 0), (2, 3), (3, 2)]);
        assert!(is_assemblable(&graph));
        assert!(!is_weakly_connected(&graph));
        assert!(!has_eulerian_path(&graph));
    }

    #[test]
    fn test_isolated_node_does_not_break_connectivity() {
        let graph = graph_from_edges(&["A", "B", "Z"], &[(0, 1), (1, 0)]);
        assert!(is_weakly_connected(&graph));
    }

    #[test]
    fn test_empty_graph() {
        let graph = DiGraph::new();
        assert!(is_assemblable(&graph));
        assert!(is_weakly_connected(&graph));
    }
}
