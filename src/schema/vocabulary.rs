//! Shared vocabulary for the three output documents.
//!
//! The PDDL problem uses lower-case predicate names, the triple and graph
//! documents use the camel-case terms under [`VOCAB_NS`].

/// Namespace of generated entities (`ex:` prefix, JSON-LD `@base`).
pub const ENTITY_NS: &str = "http://example.org/plant/entity/";
/// Namespace of domain terms (`mf:` prefix, JSON-LD `@vocab`).
pub const VOCAB_NS: &str = "http://example.org/plant/vocab#";
/// Namespace of the state vocabulary (`st:` prefix).
pub const STATE_NS: &str = "http://example.org/plant/state#";

pub mod pddl {
    pub const WORKSTATION: &str = "workstation";
    pub const ITEM: &str = "item";
    pub const DEVICE: &str = "transportationdevice";
    pub const IS_AT: &str = "isat";
    pub const PRODUCES_MODEL: &str = "producesmodel";
    pub const CONSUMES_MODEL: &str = "consumesmodel";
    pub const MODEL: &str = "model";
    pub const HAS_PATH_TO: &str = "haspathto";
}

pub mod terms {
    pub const PRODUCES_MODEL: &str = "producesModel";
    pub const CONSUMES_MODEL: &str = "consumesModel";
    pub const IS_AT: &str = "isAt";
    pub const HAS_PATH_TO: &str = "hasPathTo";
    pub const MODEL: &str = "model";
    pub const STATUS: &str = "status";
    pub const ROW: &str = "row";
    pub const COLUMN: &str = "column";

    /// Terms whose values are references to other entities.
    pub const RELATIONS: [&str; 5] = [PRODUCES_MODEL, CONSUMES_MODEL, IS_AT, HAS_PATH_TO, MODEL];
}
