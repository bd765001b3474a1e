//! Error kinds surfaced by the assembler
//!
//! Every failure reaches the caller of `build`/`trace`/`assemble` as a distinct
//! `AssemblyError` variant. An empty sequence is never used to mean "failed".

use thiserror::Error;

/// Errors produced while building, tracing or reconstructing an assembly
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Unknown construction method: '{method}' (expected \"k-mer pairwise comparison\" or \"k-mer hashing\")")]
    UnknownConstructionMethod { method: String },

    #[error("Eulerian path does not exist: {reason}")]
    NoEulerianPath { reason: String },

    #[error("Internal consistency error: {message}")]
    InternalConsistency { message: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Graph export failed: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Copyable discriminant of [`AssemblyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownConstructionMethod,
    NoEulerianPath,
    InternalConsistency,
    InvalidInput,
    Export,
    Configuration,
}

impl AssemblyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssemblyError::UnknownConstructionMethod { .. } => ErrorKind::UnknownConstructionMethod,
            AssemblyError::NoEulerianPath { .. } => ErrorKind::NoEulerianPath,
            AssemblyError::InternalConsistency { .. } => ErrorKind::InternalConsistency,
            AssemblyError::InvalidInput { .. } => ErrorKind::InvalidInput,
            AssemblyError::Export { .. } => ErrorKind::Export,
            AssemblyError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn no_path(reason: impl Into<String>) -> Self {
        AssemblyError::NoEulerianPath {
            reason: reason.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        AssemblyError::InternalConsistency {
            message: message.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        AssemblyError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for AssemblyError {
    fn from(err: config::ConfigError) -> Self {
        AssemblyError::Configuration {
            message: err.to_string(),
        }
    }
}
