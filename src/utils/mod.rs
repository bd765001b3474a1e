//! Supporting utilities: configuration, errors, DOT export and sequence helpers

pub mod configuration;
pub mod dot_export;
pub mod errors;
pub mod sequence;

pub use configuration::AssemblerConfig;
pub use errors::{AssemblyError, ErrorKind};
