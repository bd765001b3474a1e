//! K-mer Assembly Pipeline
//! =======================
//!
//! k-mers → de Bruijn graph → existence check → Eulerian path → sequence
//!
//! The assembler is single-threaded and keeps no state between calls: every
//! `assemble` builds its own graph and the tracer consumes it.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::assembly::degree::{is_weakly_connected, DegreeReport};
use crate::assembly::eulerian::trace;
use crate::assembly::graph_builder::ConstructionMethod;
use crate::assembly::reconstruct::reconstruct;
use crate::utils::configuration::AssemblerConfig;
use crate::utils::dot_export::write_dot;
use crate::utils::errors::AssemblyError;
use crate::Result;

/// Summary of one assembly run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    pub sequence: String,
    pub length: usize,
    pub k: usize,
    pub kmer_count: usize,
    pub node_count: usize,
    pub method: String,
    /// True when the graph was fully balanced and the walk is a circuit
    pub circuit: bool,
}

/// De Bruijn / Eulerian path assembler
#[derive(Debug, Clone, Default)]
pub struct KmerAssembler {
    config: AssemblerConfig,
}

impl KmerAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assemble `kmers` into a single sequence
    pub fn assemble<S: AsRef<str>>(&self, kmers: &[S]) -> Result<String> {
        self.assemble_with_report(kmers).map(|report| report.sequence)
    }

    /// Assemble `kmers` and describe the run
    #[instrument(skip_all, fields(kmers = kmers.len(), method = %self.config.method))]
    pub fn assemble_with_report<S: AsRef<str>>(&self, kmers: &[S]) -> Result<AssemblyReport> {
        let k = if self.config.validate_input {
            validate_kmers(kmers)?
        } else {
            kmers.first().map_or(0, |kmer| kmer.as_ref().chars().count())
        };

        let graph = self.config.method.build(kmers)?;
        let node_count = graph.len();
        info!(
            "🧬 Built de Bruijn graph by {}: {} nodes, {} edges",
            self.config.method,
            node_count,
            graph.edge_count()
        );

        if let Some(dot_path) = &self.config.dot_output {
            write_dot(&graph, dot_path).map_err(|e| AssemblyError::Export {
                message: format!("{e:#}"),
            })?;
        }

        let degrees = DegreeReport::analyze(&graph);
        if let Some(reason) = degrees.failure_reason() {
            return Err(AssemblyError::no_path(reason));
        }
        if self.config.require_connected && !is_weakly_connected(&graph) {
            return Err(AssemblyError::no_path(
                "graph is degree-balanced but not connected",
            ));
        }
        debug!(
            "Degree check passed: {} source(s), {} sink(s)",
            degrees.sources.len(),
            degrees.sinks.len()
        );

        let walk = trace(graph)?;
        let sequence = reconstruct(walk.path(), &walk)?;
        info!("✅ Assembled sequence of length {}", sequence.chars().count());

        Ok(AssemblyReport {
            length: sequence.chars().count(),
            sequence,
            k,
            kmer_count: kmers.len(),
            node_count,
            method: self.config.method.tag().to_string(),
            circuit: walk.is_circuit(),
        })
    }
}

/// Assemble `kmers` with the method named by `method`, optionally writing the
/// graph to `dot_output` first.
pub fn assemble_kmers<S: AsRef<str>>(
    kmers: &[S],
    method: &str,
    dot_output: Option<&Path>,
) -> Result<String> {
    let method: ConstructionMethod = method.parse()?;
    let config = AssemblerConfig {
        method,
        dot_output: dot_output.map(Path::to_path_buf),
        ..AssemblerConfig::default()
    };
    KmerAssembler::new(config).assemble(kmers)
}

/// Check that the k-mer set is non-empty with one shared length k >= 2; returns k
pub fn validate_kmers<S: AsRef<str>>(kmers: &[S]) -> Result<usize> {
    let first = kmers
        .first()
        .ok_or_else(|| AssemblyError::invalid("no k-mers given"))?;
    let k = first.as_ref().chars().count();
    if k < 2 {
        return Err(AssemblyError::invalid(format!(
            "k-mers must be at least 2 characters long, got k = {k}"
        )));
    }

    if let Some((position, kmer)) = kmers
        .iter()
        .enumerate()
        .find(|(_, kmer)| kmer.as_ref().chars().count() != k)
    {
        return Err(AssemblyError::invalid(format!(
            "k-mer {position} ('{}') has length {}, expected {k}",
            kmer.as_ref(),
            kmer.as_ref().chars().count()
        )));
    }

    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ErrorKind;
    use crate::utils::sequence::same_composition;

    #[test]
    fn test_assemble_homopolymer() {
        let kmers = vec!["aaaaa"; 7];
        for method in ConstructionMethod::ALL {
            let seq = assemble_kmers(&kmers, method.tag(), None).unwrap();
            assert_eq!(seq, "aaaaaaaaaaa");
        }
    }

    #[test]
    fn test_assemble_shuffled_kmers() {
        let kmers = ["cag", "tca", "agc", "gct", "agc", "gca", "ctc", "agc", "cag"];
        let seq = assemble_kmers(&kmers, "k-mer hashing", None).unwrap();
        assert_eq!(seq.len(), 11);
        assert!(same_composition(&seq, "agcagctcagc", 3));
    }

    #[test]
    fn test_unknown_method() {
        let err = assemble_kmers(&["agc"], "k-mer magic", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownConstructionMethod);
    }

    #[test]
    fn test_no_eulerian_path() {
        // "ag" ends up with two more outgoing than incoming edges
        let err = assemble_kmers(&["agc", "agc", "ttt", "ttt", "ttg"], "k-mer hashing", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoEulerianPath);
    }

    #[test]
    fn test_disconnected_cycles_rejected_before_tracing() {
        // ab <-> ba and cd <-> dc share no node
        let kmers = ["aba", "bab", "cdc", "dcd"];
        let err = assemble_kmers(&kmers, "k-mer hashing", None).unwrap_err();
        assert!(matches!(err, AssemblyError::NoEulerianPath { ref reason } if reason.contains("not connected")));

        // Without the connectivity gate the tracer still refuses a partial path
        let config = AssemblerConfig {
            require_connected: false,
            ..AssemblerConfig::default()
        };
        let err = KmerAssembler::new(config).assemble(&kmers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoEulerianPath);
    }

    #[test]
    fn test_validate_kmers() {
        assert_eq!(validate_kmers(&["agc", "gca"]).unwrap(), 3);
        assert_eq!(
            validate_kmers::<&str>(&[]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            validate_kmers(&["agc", "gc"]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            validate_kmers(&["a", "g"]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_report_fields() {
        let assembler = KmerAssembler::default();
        let report = assembler
            .assemble_with_report(&["atg", "tgc", "gca"])
            .unwrap();
        assert_eq!(report.sequence, "atgca");
        assert_eq!(report.length, 5);
        assert_eq!(report.k, 3);
        assert_eq!(report.kmer_count, 3);
        assert_eq!(report.node_count, 4);
        assert_eq!(report.method, "k-mer hashing");
        assert!(!report.circuit);
    }
}
