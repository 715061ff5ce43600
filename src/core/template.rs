//! PDDL problem template with `{objects}`, `{init}` and `{goal}` slots.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problem template shipped with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/problem.tpl.pddl");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cannot read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template has no {0} placeholder")]
    MissingPlaceholder(&'static str),
    #[error("template has more than one {0} placeholder")]
    DuplicatePlaceholder(&'static str),
}

/// One of the three substitution points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Objects,
    Init,
    Goal,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Objects, Slot::Init, Slot::Goal];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Objects => "{objects}",
            Self::Init => "{init}",
            Self::Goal => "{goal}",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Objects => 0,
            Self::Init => 1,
            Self::Goal => 2,
        }
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(Slot),
}

/// Text that goes into the slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemFacts {
    pub objects: String,
    pub init: String,
    pub goal: String,
}

impl ProblemFacts {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Objects => &self.objects,
            Slot::Init => &self.init,
            Slot::Goal => &self.goal,
        }
    }
}

/// A validated problem template.
///
/// Every slot occurs exactly once. Rendering walks the segments once, so
/// substituted text is never scanned for placeholders again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemTemplate {
    pub segments: Vec<Segment>,
}

impl ProblemTemplate {
    pub fn load(path: &Path) -> Result<ProblemTemplate, TemplateError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn builtin() -> Result<ProblemTemplate, TemplateError> {
        Self::parse(DEFAULT_TEMPLATE)
    }

    /// Split `input` at the slot tokens. Braces that do not start a slot
    /// token are kept as literal text.
    pub fn parse(input: &str) -> Result<ProblemTemplate, TemplateError> {
        let mut segments = Vec::new();
        let mut seen = [false; 3];
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(offset) = input[cursor..].find('{') {
            let at = cursor + offset;
            let slot = Slot::ALL
                .iter()
                .copied()
                .find(|slot| input[at..].starts_with(slot.token()));

            match slot {
                Some(slot) => {
                    if seen[slot.index()] {
                        return Err(TemplateError::DuplicatePlaceholder(slot.token()));
                    }
                    seen[slot.index()] = true;

                    if at > literal_start {
                        segments.push(Segment::Literal(input[literal_start..at].to_string()));
                    }
                    segments.push(Segment::Slot(slot));
                    cursor = at + slot.token().len();
                    literal_start = cursor;
                }
                None => cursor = at + 1,
            }
        }

        if literal_start < input.len() {
            segments.push(Segment::Literal(input[literal_start..].to_string()));
        }

        if let Some(missing) = Slot::ALL.iter().find(|slot| !seen[slot.index()]) {
            return Err(TemplateError::MissingPlaceholder(missing.token()));
        }

        Ok(ProblemTemplate { segments })
    }

    pub fn render(&self, facts: &ProblemFacts) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(facts.get(*slot)),
            }
        }
        out
    }
}
