//! # kmer-assembler - De Bruijn Graph Sequence Assembly
//!
//! Reconstructs a sequence from an unordered collection of its k-mers:
//! k-mers are turned into a de Bruijn multigraph, the graph is checked for an
//! Eulerian path, the path is traced with Hierholzer's algorithm and spelled
//! back out as a sequence.
//!
//! ```no_run
//! use kmer_assembler::assemble_kmers;
//!
//! let kmers = ["gca", "agc", "cag", "agc"];
//! let sequence = assemble_kmers(&kmers, "k-mer hashing", None)?;
//! assert_eq!(sequence.len(), 6);
//! # Ok::<(), kmer_assembler::AssemblyError>(())
//! ```

pub mod assembly;
pub mod cli;
pub mod core;
pub mod utils;

// Re-export commonly used types at crate level
pub use crate::assembly::{assemble_kmers, ConstructionMethod, KmerAssembler};
pub use crate::core::graph::{DiGraph, Node, NodePath};
pub use crate::utils::configuration::AssemblerConfig;
pub use crate::utils::errors::{AssemblyError, ErrorKind};

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, AssemblyError>;
