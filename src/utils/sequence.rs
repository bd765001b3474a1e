//! Sequence utilities for driving and checking assemblies
//!
//! Random DNA generation, k-mer extraction and composition comparison. These
//! produce the inputs and oracles the assembler is tested against.

use rand::seq::SliceRandom;
use rand::Rng;

const DNA_ALPHABET: &[u8; 4] = b"atgc";

/// Random lowercase DNA sequence with a length drawn from `min_length..=max_length`
pub fn random_dna_sequence<R: Rng + ?Sized>(
    rng: &mut R,
    min_length: usize,
    max_length: usize,
) -> String {
    let (low, high) = if min_length <= max_length {
        (min_length, max_length)
    } else {
        (max_length, min_length)
    };
    let length = rng.gen_range(low..=high);

    (0..length)
        .map(|_| DNA_ALPHABET[rng.gen_range(0..DNA_ALPHABET.len())] as char)
        .collect()
}

/// All k-mers of `sequence` in order of position.
/// Empty when `k == 0` or `k` exceeds the sequence length.
pub fn kmers_of(sequence: &str, k: usize) -> Vec<String> {
    let chars: Vec<char> = sequence.chars().collect();
    if k == 0 || k > chars.len() {
        return Vec::new();
    }
    chars.windows(k).map(|window| window.iter().collect()).collect()
}

/// All k-mers of `sequence` in uniformly shuffled order
pub fn shuffled_kmers_of<R: Rng + ?Sized>(sequence: &str, k: usize, rng: &mut R) -> Vec<String> {
    let mut kmers = kmers_of(sequence, k);
    kmers.shuffle(rng);
    kmers
}

/// Sorted k-mer multiset of `sequence`
pub fn composition(sequence: &str, k: usize) -> Vec<String> {
    let mut kmers = kmers_of(sequence, k);
    kmers.sort_unstable();
    kmers
}

/// True when both sequences have the same length and the same k-mer multiset
pub fn same_composition(s1: &str, s2: &str, k: usize) -> bool {
    if s1.chars().count() != s2.chars().count() {
        return false;
    }
    if s1 == s2 {
        return true;
    }
    composition(s1, k) == composition(s2, k)
}
