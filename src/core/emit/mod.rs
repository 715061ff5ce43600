//! Read-only projections of a [`Scenario`] into the output documents.

pub mod facts;
pub mod graph;
pub mod triples;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::schema::entity::EntityRef;
use crate::schema::scenario::Scenario;

pub use facts::FactEmitter;
pub use graph::GraphEmitter;
pub use triples::TripleEmitter;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("reference to unknown entity {0}")]
    DanglingReference(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three output document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutputFormat {
    Pddl,
    N3,
    JsonLd,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] =
        [OutputFormat::Pddl, OutputFormat::N3, OutputFormat::JsonLd];

    /// File name for a scenario with `realized` models.
    pub fn file_name(&self, realized: usize) -> String {
        match self {
            Self::Pddl => format!("problem-{}.pddl", realized),
            Self::N3 => format!("state-{}.n3", realized),
            Self::JsonLd => format!("graph-{}.jsonld", realized),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pddl => f.write_str("pddl"),
            Self::N3 => f.write_str("n3"),
            Self::JsonLd => f.write_str("jsonld"),
        }
    }
}

/// A serializer for one output format.
///
/// Emitters never mutate the scenario and may run in any order.
pub trait Emitter {
    fn format(&self) -> OutputFormat;

    fn emit(&self, scenario: &Scenario) -> Result<String, EmitError>;
}

/// Identifier of `entity`, checked against the scenario's lookup table.
pub(crate) fn name_of(scenario: &Scenario, entity: EntityRef) -> Result<String, EmitError> {
    let name = entity.to_string();
    match scenario.resolve(&name) {
        Some(found) if found == entity => Ok(name),
        _ => Err(EmitError::DanglingReference(name)),
    }
}
