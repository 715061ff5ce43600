//! Generator configuration, loadable from a RON file.
//!
//! ```ron
//! (
//!     branching_factor: 2,
//!     seed: Some(42),
//!     neighbor_policy: RowWrapping,
//!     template: "templates/problem.tpl.pddl",
//!     output_dir: "out",
//!     formats: [Pddl, JsonLd],
//! )
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::emit::OutputFormat;
use crate::core::grid::NeighborPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("branching factor must be at least 1, got {0}")]
    InvalidBranchingFactor(usize),
    #[error("no output format selected")]
    NoFormats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Children per model and level. 1 builds a chain.
    pub branching_factor: usize,
    /// Placement shuffle seed. Drawn at random when absent.
    pub seed: Option<u64>,
    pub neighbor_policy: NeighborPolicy,
    /// PDDL problem template with `{objects}`, `{init}`, `{goal}`.
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub formats: Vec<OutputFormat>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            branching_factor: 1,
            seed: None,
            neighbor_policy: NeighborPolicy::default(),
            template: PathBuf::from("templates/problem.tpl.pddl"),
            output_dir: PathBuf::from("."),
            formats: OutputFormat::ALL.to_vec(),
        }
    }
}

impl GeneratorConfig {
    pub fn load_from_ron(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<GeneratorConfig, ConfigError> {
        let config: GeneratorConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branching_factor == 0 {
            return Err(ConfigError::InvalidBranchingFactor(self.branching_factor));
        }
        if self.formats.is_empty() {
            return Err(ConfigError::NoFormats);
        }
        Ok(())
    }

    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}
