//! De Bruijn Graph Construction
//! ============================
//!
//! Each k-mer becomes one edge from its (k-1)-prefix node to its (k-1)-suffix
//! node. Distinct (k-1)-mers collapse to a single node (first seen wins, prefix
//! before suffix), repeated k-mers become parallel edges.
//!
//! Two label-resolution strategies are provided:
//! - **pairwise comparison**: linear scan over existing labels, O(n·L) per k-mer
//! - **hashing**: label → index table, O(L) amortized per k-mer
//!
//! Both assign node indices in the same first-appearance order, so for the same
//! input they produce identical graphs.
//!
//! All k-mers must share one length. Mixed lengths are not detected here; the
//! assembler validates its input before calling in.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::graph::DiGraph;
use crate::utils::errors::AssemblyError;
use crate::Result;

/// Construction method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConstructionMethod {
    #[serde(rename = "k-mer pairwise comparison")]
    PairwiseComparison,
    #[default]
    #[serde(rename = "k-mer hashing")]
    Hashing,
}

impl ConstructionMethod {
    pub const ALL: [ConstructionMethod; 2] = [
        ConstructionMethod::PairwiseComparison,
        ConstructionMethod::Hashing,
    ];

    /// The string tag callers use to select this method
    pub fn tag(&self) -> &'static str {
        match self {
            ConstructionMethod::PairwiseComparison => "k-mer pairwise comparison",
            ConstructionMethod::Hashing => "k-mer hashing",
        }
    }

    /// Build a de Bruijn graph from `kmers` with this method
    pub fn build<S: AsRef<str>>(&self, kmers: &[S]) -> Result<DiGraph> {
        match self {
            ConstructionMethod::PairwiseComparison => build_by_comparison(kmers),
            ConstructionMethod::Hashing => build_by_hashing(kmers),
        }
    }
}

impl fmt::Display for ConstructionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ConstructionMethod {
    type Err = AssemblyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ConstructionMethod::ALL
            .into_iter()
            .find(|method| method.tag() == s)
            .ok_or_else(|| AssemblyError::UnknownConstructionMethod {
                method: s.to_string(),
            })
    }
}

/// Build the graph resolving labels by linear scan over existing nodes
pub fn build_by_comparison<S: AsRef<str>>(kmers: &[S]) -> Result<DiGraph> {
    build_with(kmers, LinearScan)
}

/// Build the graph resolving labels through a hash index
pub fn build_by_hashing<S: AsRef<str>>(kmers: &[S]) -> Result<DiGraph> {
    build_with(kmers, HashIndex::with_capacity(kmers.len() + 1))
}

/// Split a k-mer into its (k-1)-prefix and (k-1)-suffix
pub fn split_kmer(kmer: &str) -> Option<(&str, &str)> {
    let first_len = kmer.chars().next()?.len_utf8();
    let (last_start, _) = kmer.char_indices().next_back()?;
    Some((&kmer[..last_start], &kmer[first_len..]))
}

/// Strategy for turning a label into a node index, creating the node if new
trait LabelIndex {
    fn resolve(&mut self, graph: &mut DiGraph, label: &str) -> usize;
}

struct LinearScan;

impl LabelIndex for LinearScan {
    fn resolve(&mut self, graph: &mut DiGraph, label: &str) -> usize {
        match graph.position(label) {
            Some(index) => index,
            None => graph.add_node(label),
        }
    }
}

struct HashIndex {
    index: AHashMap<String, usize>,
}

impl HashIndex {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: AHashMap::with_capacity(capacity),
        }
    }
}

impl LabelIndex for HashIndex {
    fn resolve(&mut self, graph: &mut DiGraph, label: &str) -> usize {
        if let Some(&index) = self.index.get(label) {
            return index;
        }
        let index = graph.add_node(label);
        self.index.insert(label.to_string(), index);
        index
    }
}

fn build_with<S: AsRef<str>, I: LabelIndex>(kmers: &[S], mut labels: I) -> Result<DiGraph> {
    let mut graph = DiGraph::new();

    for (position, kmer) in kmers.iter().enumerate() {
        let kmer = kmer.as_ref();
        let (prefix, suffix) = split_kmer(kmer).ok_or_else(|| {
            AssemblyError::invalid(format!("k-mer at position {position} is empty"))
        })?;

        let from = labels.resolve(&mut graph, prefix);
        let to = labels.resolve(&mut graph, suffix);
        graph.push_outgoing(from, to);
    }

    debug!(
        "Built de Bruijn graph: {} nodes, {} edges from {} k-mers",
        graph.len(),
        graph.edge_count(),
        kmers.len()
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tags_round_trip() {
        for method in ConstructionMethod::ALL {
            assert_eq!(method.tag().parse::<ConstructionMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method_tag() {
        let err = "k-mer sorting".parse::<ConstructionMethod>().unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::UnknownConstructionMethod { ref method } if method == "k-mer sorting"
        ));
    }

    #[test]
    fn test_split_kmer() {
        assert_eq!(split_kmer("agc"), Some(("ag", "gc")));
        assert_eq!(split_kmer("a"), Some(("", "")));
        assert_eq!(split_kmer(""), None);
    }

    #[test]
    fn test_prefix_node_created_before_suffix() {
        let graph = build_by_hashing(&["agc"]).unwrap();
        assert_eq!(graph.node(0).unwrap().label(), "ag");
        assert_eq!(graph.node(1).unwrap().label(), "gc");
        assert_eq!(graph.node(0).unwrap().outgoing(), &[1]);
        assert_eq!(graph.node(1).unwrap().in_degree(), 1);
    }

    #[test]
    fn test_repeated_kmers_become_parallel_edges() {
        let kmers = vec!["aaaa"; 7];
        for method in ConstructionMethod::ALL {
            let graph = method.build(&kmers).unwrap();
            assert_eq!(graph.len(), 1);
            assert_eq!(graph.node(0).unwrap().outgoing(), &[0; 7]);
            assert_eq!(graph.node(0).unwrap().in_degree(), 7);
        }
    }

    #[test]
    fn test_strategies_agree() {
        let kmers = ["gct", "agc", "cag", "tca", "agc", "gca", "ctc", "cag", "agc"];
        let by_comparison = build_by_comparison(&kmers).unwrap();
        let by_hashing = build_by_hashing(&kmers).unwrap();
        assert_eq!(by_comparison, by_hashing);
        assert!(by_hashing.validate().is_ok());
    }

    #[test]
    fn test_empty_kmer_is_rejected() {
        let err = build_by_comparison(&["ag", ""]).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidInput { .. }));
    }
}
