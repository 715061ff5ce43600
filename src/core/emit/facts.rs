//! PDDL problem emission.

use super::{name_of, EmitError, Emitter, OutputFormat};
use crate::core::template::{ProblemFacts, ProblemTemplate};
use crate::schema::entity::{EntityRef, Item, Workstation};
use crate::schema::location::{Location, LocationId};
use crate::schema::scenario::Scenario;
use crate::schema::vocabulary::pddl;

/// Fills a [`ProblemTemplate`] with the scenario's objects, initial facts
/// and goal.
#[derive(Debug, Clone)]
pub struct FactEmitter {
    template: ProblemTemplate,
}

impl FactEmitter {
    pub fn new(template: ProblemTemplate) -> Self {
        Self { template }
    }

    /// The three slot values without the surrounding template.
    pub fn facts(&self, scenario: &Scenario) -> Result<ProblemFacts, EmitError> {
        let objects = scenario
            .entities()
            .map(|entity| name_of(scenario, entity))
            .collect::<Result<Vec<_>, _>>()?
            .join(" ");

        let mut init = Vec::new();
        for ws in &scenario.workstations {
            init.extend(workstation_facts(scenario, ws)?);
        }
        for item in &scenario.items {
            init.extend(item_facts(scenario, item)?);
        }
        let agv = name_of(scenario, EntityRef::Device)?;
        let dock = name_of(scenario, EntityRef::Location(scenario.device.location))?;
        init.push(fact(pddl::DEVICE, &[&agv]));
        init.push(fact(pddl::IS_AT, &[&agv, &dock]));
        for loc in &scenario.locations {
            init.extend(location_facts(scenario, loc)?);
        }

        let root = name_of(scenario, EntityRef::Model(scenario.root()))?;
        let storage = name_of(scenario, EntityRef::Location(LocationId::Storage))?;
        let goal = scenario
            .items
            .iter()
            .map(|item| {
                let id = name_of(scenario, EntityRef::Item(item.id))?;
                Ok(format!(
                    "(and {} {})",
                    fact(pddl::MODEL, &[&id, &root]),
                    fact(pddl::IS_AT, &[&id, &storage])
                ))
            })
            .collect::<Result<Vec<_>, EmitError>>()?
            .join(" ");

        Ok(ProblemFacts {
            objects,
            init: init.join(" "),
            goal,
        })
    }
}

impl Emitter for FactEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pddl
    }

    fn emit(&self, scenario: &Scenario) -> Result<String, EmitError> {
        let facts = self.facts(scenario)?;
        Ok(self.template.render(&facts))
    }
}

fn fact(predicate: &str, args: &[&str]) -> String {
    format!("({} {})", predicate, args.join(" "))
}

fn workstation_facts(scenario: &Scenario, ws: &Workstation) -> Result<Vec<String>, EmitError> {
    let id = name_of(scenario, EntityRef::Workstation(ws.id))?;
    let loc = name_of(scenario, EntityRef::Location(ws.location))?;
    let produced = name_of(scenario, EntityRef::Model(ws.produces))?;

    let mut facts = vec![
        fact(pddl::WORKSTATION, &[&id]),
        fact(ws.status.as_str(), &[&id]),
        fact(pddl::IS_AT, &[&id, &loc]),
        fact(pddl::PRODUCES_MODEL, &[&id, &produced]),
    ];
    for consumed in &ws.consumes {
        let model = name_of(scenario, EntityRef::Model(*consumed))?;
        facts.push(fact(pddl::CONSUMES_MODEL, &[&id, &model]));
    }
    Ok(facts)
}

fn item_facts(scenario: &Scenario, item: &Item) -> Result<Vec<String>, EmitError> {
    let id = name_of(scenario, EntityRef::Item(item.id))?;
    let model = name_of(scenario, EntityRef::Model(item.model))?;
    let loc = name_of(scenario, EntityRef::Location(item.location))?;
    Ok(vec![
        fact(pddl::ITEM, &[&id]),
        fact(pddl::MODEL, &[&id, &model]),
        fact(pddl::IS_AT, &[&id, &loc]),
    ])
}

fn location_facts(scenario: &Scenario, loc: &Location) -> Result<Vec<String>, EmitError> {
    let from = name_of(scenario, EntityRef::Location(loc.id))?;
    loc.paths
        .iter()
        .map(|to| {
            let to = name_of(scenario, EntityRef::Location(*to))?;
            Ok(fact(pddl::HAS_PATH_TO, &[&from, &to]))
        })
        .collect()
}
