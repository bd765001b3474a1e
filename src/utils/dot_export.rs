/// Graphviz DOT export of a de Bruijn graph
/// Nodes are (k-1)-mer labels, each edge is labelled with its full k-mer
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::core::graph::DiGraph;

/// Render `graph` as a DOT document
pub fn to_dot(graph: &DiGraph) -> String {
    let mut dot = String::new();
    // Writing into a String cannot fail
    let _ = render(graph, &mut dot);
    dot
}

/// Write `graph` as a DOT file at `output_path`
pub fn write_dot<P: AsRef<Path>>(graph: &DiGraph, output_path: P) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create DOT file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(to_dot(graph).as_bytes())
        .with_context(|| format!("Failed to write DOT file: {}", path.display()))?;
    writer.flush()?;

    info!(
        "📊 Wrote de Bruijn graph ({} nodes, {} edges) to DOT: {}",
        graph.len(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

fn render(graph: &DiGraph, out: &mut String) -> std::fmt::Result {
    writeln!(out, "digraph {{")?;
    writeln!(out, "label=\"de Bruijn graph\"")?;

    for (from, to) in graph.edges() {
        let (Some(prefix), Some(suffix)) = (graph.node(from), graph.node(to)) else {
            continue;
        };
        let prefix = prefix.label();
        let suffix = suffix.label();
        let kmer = match suffix.chars().next_back() {
            Some(last) => format!("{prefix}{last}"),
            None => prefix.to_string(),
        };
        writeln!(
            out,
            "\"{}\"->\"{}\"[label=\"{}\"];",
            escape(prefix),
            escape(suffix),
            escape(&kmer)
        )?;
    }

    writeln!(out, "}}")
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
