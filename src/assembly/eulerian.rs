//! Eulerian Path Tracing
//! =====================
//!
//! The path is found by closing the graph into a circuit and cutting it open
//! again:
//!
//! 1. The surplus-out node is the start and the surplus-in node the end. A fully
//!    balanced graph uses node 0 for both.
//! 2. One synthetic edge `end -> start` is appended, which balances every node.
//! 3. Hierholzer's algorithm finds an Eulerian circuit of the closed graph.
//! 4. The circuit is rotated so that it begins right after the synthetic edge
//!    and ends right before it.
//!
//! Every edge is addressed by `(from, slot)` where `slot` is its position in the
//! outgoing list of `from`. Parallel edges therefore stay distinguishable, and
//! the synthetic edge is located by identity rather than by its endpoints (a real
//! `end -> start` edge may exist as well).
//!
//! Tracing takes the graph by value: its edges are spent and only the node
//! labels survive in the returned [`EulerianWalk`].

use tracing::{debug, info, trace as trace_log};

use crate::assembly::degree::{is_weakly_connected, DegreeReport, EulerianPathType};
use crate::core::graph::{DiGraph, LabelLookup, NodePath};
use crate::utils::errors::AssemblyError;
use crate::Result;

/// Identity of one edge: the `slot`-th entry of `from`'s outgoing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    pub from: usize,
    pub slot: usize,
}

/// The edge added to close the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticEdge {
    /// Path end (surplus-in node, or node 0 for a circuit)
    pub from: usize,
    /// Path start (surplus-out node, or node 0 for a circuit)
    pub to: usize,
    pub edge: EdgeRef,
}

/// One position of a circuit: the node reached and the edge used to reach it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    node: usize,
    via: Option<EdgeRef>,
}

/// Result of tracing a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerianWalk {
    path: NodePath,
    labels: Vec<String>,
    is_circuit: bool,
}

impl EulerianWalk {
    /// Node indices in walk order
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Labels of the traced graph, indexed like the path
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// True when the source graph was fully balanced (start == end)
    pub fn is_circuit(&self) -> bool {
        self.is_circuit
    }

    /// Number of edges walked, equal to the number of k-mers
    pub fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn into_parts(self) -> (NodePath, Vec<String>) {
        (self.path, self.labels)
    }
}

impl LabelLookup for EulerianWalk {
    fn label(&self, index: usize) -> Option<&str> {
        self.labels.label(index)
    }
}

/// Add the synthetic `end -> start` edge, leaving every node balanced
pub fn close_circuit(graph: &mut DiGraph) -> Result<SyntheticEdge> {
    if graph.is_empty() {
        return Err(AssemblyError::invalid("cannot trace an empty graph"));
    }

    let report = DegreeReport::analyze(graph);
    let (start, end) = match report.path_type() {
        EulerianPathType::Path { source, sink } => (source, sink),
        EulerianPathType::Circuit => (0, 0),
        EulerianPathType::None => {
            return Err(match report.failure_reason() {
                Some(reason) => AssemblyError::no_path(reason),
                None => AssemblyError::internal(format!(
                    "{} surplus-out and {} surplus-in nodes: degree sums disagree",
                    report.sources.len(),
                    report.sinks.len()
                )),
            });
        }
    };

    let slot = graph
        .node(end)
        .map(|node| node.out_degree())
        .ok_or_else(|| AssemblyError::internal(format!("path end {end} is not a node")))?;
    graph.push_outgoing(end, start);

    debug!("Closed graph with synthetic edge {} -> {}", end, start);
    Ok(SyntheticEdge {
        from: end,
        to: start,
        edge: EdgeRef { from: end, slot },
    })
}

/// Trace an Eulerian path through `graph`, consuming it
pub fn trace(mut graph: DiGraph) -> Result<EulerianWalk> {
    let kmer_edges = graph.edge_count();
    let synthetic = close_circuit(&mut graph)?;

    if !graph.is_balanced() {
        return Err(AssemblyError::internal(
            "graph is still unbalanced after adding the synthetic edge",
        ));
    }

    let circuit = hierholzer(&graph, synthetic.to);
    check_circuit(&graph, &circuit, kmer_edges + 1)?;

    let path = open_circuit(&circuit, &synthetic)?;
    let is_circuit = synthetic.from == synthetic.to;

    info!(
        "Traced Eulerian {} over {} edges ({} nodes in path)",
        if is_circuit { "circuit" } else { "path" },
        kmer_edges,
        path.len()
    );

    Ok(EulerianWalk {
        path,
        labels: graph.into_labels(),
        is_circuit,
    })
}

/// Eulerian circuit of an already balanced, connected graph, starting at `start`.
/// The returned path repeats `start` at both ends.
pub fn eulerian_circuit(graph: &DiGraph, start: usize) -> Result<NodePath> {
    if start >= graph.len() {
        return Err(AssemblyError::invalid(format!(
            "start node {start} is outside 0..{}",
            graph.len()
        )));
    }
    if !graph.is_balanced() {
        return Err(AssemblyError::no_path("graph is not balanced"));
    }

    let circuit = hierholzer(graph, start);
    check_circuit(graph, &circuit, graph.edge_count())?;
    Ok(circuit.into_iter().map(|step| step.node).collect())
}

/// Iterative Hierholzer. The stack holds the walk in progress; a node with no
/// unused outgoing edge is moved to the circuit, so every later sub-walk ends up
/// spliced in at the node it branched from. Edges are consumed by advancing a
/// per-node cursor, never by removing values.
fn hierholzer(graph: &DiGraph, start: usize) -> Vec<Step> {
    let nodes = graph.nodes();
    let mut next_slot = vec![0usize; nodes.len()];
    let mut stack = vec![Step {
        node: start,
        via: None,
    }];
    let mut circuit = Vec::with_capacity(graph.edge_count() + 1);

    while let Some(&top) = stack.last() {
        let from = top.node;
        let slot = next_slot[from];
        match nodes[from].outgoing().get(slot) {
            Some(&to) => {
                next_slot[from] += 1;
                stack.push(Step {
                    node: to,
                    via: Some(EdgeRef { from, slot }),
                });
            }
            None => {
                trace_log!("node {} exhausted, appended at circuit position {}", from, circuit.len());
                circuit.push(top);
                stack.pop();
            }
        }
    }

    circuit.reverse();
    circuit
}

/// Verify the circuit is closed, chained edge to edge and covers `expected_edges`
fn check_circuit(graph: &DiGraph, circuit: &[Step], expected_edges: usize) -> Result<()> {
    let walked = circuit.len().saturating_sub(1);
    if walked < expected_edges {
        let reason = if is_weakly_connected(graph) {
            format!("circuit covers only {walked} of {expected_edges} edges")
        } else {
            format!(
                "graph is not connected: circuit covers only {walked} of {expected_edges} edges"
            )
        };
        return Err(AssemblyError::no_path(reason));
    }
    if walked > expected_edges {
        return Err(AssemblyError::internal(format!(
            "circuit walked {walked} edges but the graph has {expected_edges}"
        )));
    }

    if let (Some(first), Some(last)) = (circuit.first(), circuit.last()) {
        if first.node != last.node {
            return Err(AssemblyError::internal(format!(
                "circuit starts at node {} but ends at node {}",
                first.node, last.node
            )));
        }
    }

    for pair in circuit.windows(2) {
        match pair[1].via {
            Some(edge) if edge.from == pair[0].node => {}
            _ => {
                return Err(AssemblyError::internal(format!(
                    "circuit step {} -> {} is not backed by its recorded edge",
                    pair[0].node, pair[1].node
                )))
            }
        }
    }

    Ok(())
}

/// Rotate the circuit so it starts just after the synthetic edge and stops just
/// before it. The circuit's first and last entries are the same node, so the
/// wrap-around skips index 0.
fn open_circuit(circuit: &[Step], synthetic: &SyntheticEdge) -> Result<NodePath> {
    let cut = circuit
        .iter()
        .position(|step| step.via == Some(synthetic.edge))
        .ok_or_else(|| {
            AssemblyError::internal(format!(
                "synthetic edge {} -> {} not found in circuit",
                synthetic.from, synthetic.to
            ))
        })?;

    // cut >= 1 because circuit[0] has no incoming edge
    if circuit[cut - 1].node != synthetic.from || circuit[cut].node != synthetic.to {
        return Err(AssemblyError::internal(format!(
            "synthetic edge found between nodes {} and {}, expected {} -> {}",
            circuit[cut - 1].node, circuit[cut].node, synthetic.from, synthetic.to
        )));
    }

    let path: NodePath = circuit[cut..]
        .iter()
        .chain(&circuit[1..cut])
        .map(|step| step.node)
        .collect();

    Ok(path)
}
