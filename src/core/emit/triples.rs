//! N3 state document emission.
//!
//! Invariant relations are plain triples. Facts a planner may change are
//! quoted inside the contents of a single initial state.

use std::fmt::Write;

use super::{name_of, EmitError, Emitter, OutputFormat};
use crate::schema::entity::EntityRef;
use crate::schema::scenario::Scenario;
use crate::schema::vocabulary::{terms, ENTITY_NS, STATE_NS, VOCAB_NS};

/// Name of the state that holds the mutable facts.
pub const INITIAL_STATE: &str = "st:initial";

/// A subject-predicate-object statement in prefixed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    fn new(subject: String, predicate: String, object: String) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Both halves of the state document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDocument {
    pub invariants: Vec<Triple>,
    pub initial: Vec<Triple>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TripleEmitter;

impl TripleEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn statements(&self, scenario: &Scenario) -> Result<StateDocument, EmitError> {
        let mut doc = StateDocument::default();
        let node = |entity: EntityRef| -> Result<String, EmitError> {
            Ok(format!("ex:{}", name_of(scenario, entity)?))
        };
        let term = |name: &str| format!("mf:{}", name);

        for entity in scenario.entities() {
            doc.invariants.push(Triple::new(
                node(entity)?,
                "a".to_string(),
                term(entity.type_name()),
            ));
        }

        for ws in &scenario.workstations {
            let subject = node(EntityRef::Workstation(ws.id))?;
            doc.invariants.push(Triple::new(
                subject.clone(),
                term(terms::PRODUCES_MODEL),
                node(EntityRef::Model(ws.produces))?,
            ));
            for consumed in &ws.consumes {
                doc.invariants.push(Triple::new(
                    subject.clone(),
                    term(terms::CONSUMES_MODEL),
                    node(EntityRef::Model(*consumed))?,
                ));
            }
            doc.initial.push(Triple::new(
                subject.clone(),
                term(terms::STATUS),
                format!("\"{}\"", ws.status.as_str()),
            ));
            doc.initial.push(Triple::new(
                subject,
                term(terms::IS_AT),
                node(EntityRef::Location(ws.location))?,
            ));
        }

        for item in &scenario.items {
            let subject = node(EntityRef::Item(item.id))?;
            doc.initial.push(Triple::new(
                subject.clone(),
                term(terms::MODEL),
                node(EntityRef::Model(item.model))?,
            ));
            doc.initial.push(Triple::new(
                subject,
                term(terms::IS_AT),
                node(EntityRef::Location(item.location))?,
            ));
        }

        doc.initial.push(Triple::new(
            node(EntityRef::Device)?,
            term(terms::IS_AT),
            node(EntityRef::Location(scenario.device.location))?,
        ));

        for loc in &scenario.locations {
            let subject = node(EntityRef::Location(loc.id))?;
            for to in &loc.paths {
                doc.invariants.push(Triple::new(
                    subject.clone(),
                    term(terms::HAS_PATH_TO),
                    node(EntityRef::Location(*to))?,
                ));
            }
        }

        Ok(doc)
    }
}

impl Emitter for TripleEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::N3
    }

    fn emit(&self, scenario: &Scenario) -> Result<String, EmitError> {
        let doc = self.statements(scenario)?;
        let mut out = String::new();

        // writing into a String cannot fail
        let _ = writeln!(out, "@prefix ex: <{}> .", ENTITY_NS);
        let _ = writeln!(out, "@prefix mf: <{}> .", VOCAB_NS);
        let _ = writeln!(out, "@prefix st: <{}> .", STATE_NS);
        out.push('\n');

        for t in &doc.invariants {
            let _ = writeln!(out, "{} {} {} .", t.subject, t.predicate, t.object);
        }
        out.push('\n');

        let _ = writeln!(out, "{} a st:State ;", INITIAL_STATE);
        out.push_str("    st:contents {\n");
        for t in &doc.initial {
            let _ = writeln!(out, "        {} {} {} .", t.subject, t.predicate, t.object);
        }
        out.push_str("    } .\n");

        Ok(out)
    }
}
