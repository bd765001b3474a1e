//! Sequence reconstruction from a node path
//!
//! The first node contributes its full label, each following node contributes
//! the last character of its label. The result has
//! `len(first label) + path.len() - 1` characters.

use crate::core::graph::LabelLookup;
use crate::utils::errors::AssemblyError;
use crate::Result;

/// Spell out the sequence walked by `path`
pub fn reconstruct<L: LabelLookup + ?Sized>(path: &[usize], labels: &L) -> Result<String> {
    let (&first, rest) = path
        .split_first()
        .ok_or_else(|| AssemblyError::invalid("cannot reconstruct a sequence from an empty path"))?;

    let seed = lookup(labels, first)?;
    let mut sequence = String::with_capacity(seed.len() + rest.len());
    sequence.push_str(seed);

    for &index in rest {
        let last = lookup(labels, index)?
            .chars()
            .next_back()
            .ok_or_else(|| AssemblyError::invalid(format!("node {index} has an empty label")))?;
        sequence.push(last);
    }

    Ok(sequence)
}

fn lookup<L: LabelLookup + ?Sized>(labels: &L, index: usize) -> Result<&str> {
    labels
        .label(index)
        .ok_or_else(|| AssemblyError::internal(format!("path refers to missing node {index}")))
}
