//! JSON-LD graph emission.
//!
//! Every entity appears once in `@graph`; relations are identifier strings
//! resolved against `@base`, never nested node copies.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{name_of, EmitError, Emitter, OutputFormat};
use crate::schema::entity::EntityRef;
use crate::schema::scenario::Scenario;
use crate::schema::vocabulary::{terms, ENTITY_NS, VOCAB_NS};

/// One entry of `@graph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub a: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces_model: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes_model: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_path_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl GraphNode {
    fn new(id: String, a: &'static str) -> Self {
        Self {
            id,
            a,
            status: None,
            produces_model: None,
            consumes_model: Vec::new(),
            model: None,
            is_at: None,
            has_path_to: Vec::new(),
            row: None,
            column: None,
        }
    }

    /// Identifiers this node points at.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.produces_model
            .iter()
            .chain(self.consumes_model.iter())
            .chain(self.model.iter())
            .chain(self.is_at.iter())
            .chain(self.has_path_to.iter())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphDocument {
    #[serde(rename = "@context")]
    pub context: Value,
    #[serde(rename = "@graph")]
    pub graph: Vec<GraphNode>,
}

/// The `@context` block: short names for JSON-LD keywords and the domain
/// terms, with relation terms typed as references.
pub fn context() -> Value {
    let mut ctx = Map::new();
    ctx.insert("@base".to_string(), json!(ENTITY_NS));
    ctx.insert("@vocab".to_string(), json!(VOCAB_NS));
    ctx.insert("id".to_string(), json!("@id"));
    ctx.insert("a".to_string(), json!("@type"));
    for relation in terms::RELATIONS {
        ctx.insert(
            relation.to_string(),
            json!({ "@id": format!("{}{}", VOCAB_NS, relation), "@type": "@id" }),
        );
    }
    for literal in [terms::STATUS, terms::ROW, terms::COLUMN] {
        ctx.insert(literal.to_string(), json!(format!("{}{}", VOCAB_NS, literal)));
    }
    Value::Object(ctx)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphEmitter;

impl GraphEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn document(&self, scenario: &Scenario) -> Result<GraphDocument, EmitError> {
        let mut graph = Vec::new();
        for entity in scenario.entities() {
            graph.push(self.node(scenario, entity)?);
        }
        Ok(GraphDocument {
            context: context(),
            graph,
        })
    }

    fn node(&self, scenario: &Scenario, entity: EntityRef) -> Result<GraphNode, EmitError> {
        let dangling = || EmitError::DanglingReference(entity.to_string());
        let mut node = GraphNode::new(name_of(scenario, entity)?, entity.type_name());

        match entity {
            EntityRef::Model(_) => {}
            EntityRef::Workstation(id) => {
                let ws = scenario.workstation(id).ok_or_else(dangling)?;
                node.status = Some(ws.status.as_str());
                node.produces_model = Some(name_of(scenario, EntityRef::Model(ws.produces))?);
                node.consumes_model = ws
                    .consumes
                    .iter()
                    .map(|m| name_of(scenario, EntityRef::Model(*m)))
                    .collect::<Result<_, _>>()?;
                node.is_at = Some(name_of(scenario, EntityRef::Location(ws.location))?);
            }
            EntityRef::Item(id) => {
                let item = scenario.item(id).ok_or_else(dangling)?;
                node.model = Some(name_of(scenario, EntityRef::Model(item.model))?);
                node.is_at = Some(name_of(scenario, EntityRef::Location(item.location))?);
            }
            EntityRef::Location(id) => {
                let loc = scenario.location(id).ok_or_else(dangling)?;
                node.has_path_to = loc
                    .paths
                    .iter()
                    .map(|to| name_of(scenario, EntityRef::Location(*to)))
                    .collect::<Result<_, _>>()?;
                if let Some(coords) = loc.coords {
                    node.row = Some(coords.row);
                    node.column = Some(coords.column);
                }
            }
            EntityRef::Device => {
                let dock = EntityRef::Location(scenario.device.location);
                node.is_at = Some(name_of(scenario, dock)?);
            }
        }

        Ok(node)
    }
}

impl Emitter for GraphEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::JsonLd
    }

    fn emit(&self, scenario: &Scenario) -> Result<String, EmitError> {
        let doc = self.document(scenario)?;
        let mut text = serde_json::to_string_pretty(&doc)?;
        text.push('\n');
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::ScenarioGenerator;

    fn chain_of_four() -> Scenario {
        ScenarioGenerator::builder().seed(3).build().unwrap().generate(4).unwrap()
    }

    #[test]
    fn context_declares_keywords_and_relations() {
        let ctx = context();
        assert_eq!(ctx["id"], "@id");
        assert_eq!(ctx["a"], "@type");
        assert_eq!(ctx["@base"], ENTITY_NS);
        for relation in terms::RELATIONS {
            assert_eq!(ctx[relation]["@type"], "@id", "{} should be a reference", relation);
        }
        assert!(ctx["status"].is_string());
    }

    #[test]
    fn workstation_node_uses_references() {
        let doc = GraphEmitter::new().document(&chain_of_four()).unwrap();
        let ws = doc.graph.iter().find(|n| n.id == "workstation0").unwrap();
        assert_eq!(ws.a, "Workstation");
        assert_eq!(ws.status, Some("off"));
        assert_eq!(ws.produces_model.as_deref(), Some("model0"));
        assert_eq!(ws.consumes_model, vec!["model1".to_string()]);
        assert_eq!(ws.is_at.as_deref(), Some("loc0"));
    }

    #[test]
    fn node_list_is_flat_and_complete() {
        let scenario = chain_of_four();
        let doc = GraphEmitter::new().document(&scenario).unwrap();
        let ids: Vec<String> = doc.graph.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, scenario.entity_ids());
        for node in &doc.graph {
            for target in node.references() {
                assert!(ids.iter().any(|id| id == target), "dangling {}", target);
            }
        }
    }

    #[test]
    fn serialized_shape() {
        let text = GraphEmitter::new().emit(&chain_of_four()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let graph = value["@graph"].as_array().unwrap();
        assert_eq!(graph.len(), 8);

        let cell = graph.iter().find(|n| n["id"] == "loc0").unwrap();
        assert_eq!(cell["a"], "Location");
        assert_eq!(cell["row"], 0);
        assert_eq!(cell["hasPathTo"], json!(["locstorage", "loccharging"]));

        let storage = graph.iter().find(|n| n["id"] == "locstorage").unwrap();
        assert!(storage.get("row").is_none());

        let model = graph.iter().find(|n| n["id"] == "model1").unwrap();
        assert_eq!(model.as_object().unwrap().len(), 2);
    }
}
