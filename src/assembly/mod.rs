//! Assembly modules
//!
//! **Construction**: `graph_builder.rs` - k-mers to de Bruijn multigraph
//! **Existence**: `degree.rs` - degree balance and connectivity checks
//! **Tracing**: `eulerian.rs` - Eulerian path via Hierholzer's algorithm
//! **Output**: `reconstruct.rs` - node path back to a sequence
//! **Pipeline**: `assembler.rs` - end-to-end assembly

pub mod assembler;
pub mod degree;
pub mod eulerian;
pub mod graph_builder;
pub mod reconstruct;

pub use assembler::{assemble_kmers, validate_kmers, AssemblyReport, KmerAssembler};
pub use degree::{has_eulerian_path, is_assemblable, is_weakly_connected, DegreeReport, EulerianPathType};
pub use eulerian::{close_circuit, eulerian_circuit, trace, EulerianWalk, SyntheticEdge};
pub use graph_builder::{build_by_comparison, build_by_hashing, ConstructionMethod};
pub use reconstruct::reconstruct;
