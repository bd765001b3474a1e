use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::assembly::graph_builder::ConstructionMethod;
use crate::Result;

/// Environment variable prefix, e.g. `KASM__METHOD="k-mer pairwise comparison"`
pub const ENV_PREFIX: &str = "KASM";

/// Assembler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Graph construction method
    pub method: ConstructionMethod,
    /// Write the de Bruijn graph as DOT before tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_output: Option<PathBuf>,
    /// Reject degree-balanced graphs that fall apart into several components
    pub require_connected: bool,
    /// Check for empty input, mixed k-mer lengths and k < 2 before building
    pub validate_input: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            method: ConstructionMethod::Hashing,
            dot_output: None,
            require_connected: true,
            validate_input: true,
        }
    }
}

impl AssemblerConfig {
    pub fn with_method(method: ConstructionMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Layer built-in defaults, an optional TOML file and `KASM__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                info!("🔧 Loading configuration from {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            }
            None => debug!("No configuration file given, using built-in defaults"),
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: AssemblerConfig = builder.build()?.try_deserialize()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}
