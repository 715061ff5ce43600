//! Split of the model tree into assemblers and stocked parts.

use crate::core::tree::ModelTree;
use crate::schema::entity::{Item, ItemId, ModelId, WorkstationId};
use crate::schema::location::LocationId;

/// A workstation before it has been placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Producer {
    pub id: WorkstationId,
    pub produces: ModelId,
    pub consumes: Vec<ModelId>,
}

/// Result of the role split. Workstation and item numbering is
/// sequential and independent of model numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignment {
    pub producers: Vec<Producer>,
    pub items: Vec<Item>,
}

impl RoleAssignment {
    pub fn assign(tree: &ModelTree) -> RoleAssignment {
        let mut roles = RoleAssignment::default();

        for model in &tree.models {
            if model.is_leaf() {
                roles.items.push(Item {
                    id: ItemId(roles.items.len()),
                    model: model.id,
                    location: LocationId::Storage,
                });
            } else {
                roles.producers.push(Producer {
                    id: WorkstationId(roles.producers.len()),
                    produces: model.id,
                    consumes: model.children.clone(),
                });
            }
        }

        roles
    }

    pub fn workstation_ids(&self) -> Vec<WorkstationId> {
        self.producers.iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_splits_into_one_of_each() {
        let tree = ModelTree::build(4, 1).unwrap();
        let roles = RoleAssignment::assign(&tree);
        assert_eq!(
            roles.producers,
            vec![Producer {
                id: WorkstationId(0),
                produces: ModelId(0),
                consumes: vec![ModelId(1)],
            }]
        );
        assert_eq!(roles.items.len(), 1);
        assert_eq!(roles.items[0].model, ModelId(1));
        assert_eq!(roles.items[0].location, LocationId::Storage);
    }

    #[test]
    fn root_only_tree_has_no_workstations() {
        let tree = ModelTree::build(1, 1).unwrap();
        let roles = RoleAssignment::assign(&tree);
        assert!(roles.producers.is_empty());
        assert_eq!(roles.items.len(), 1);
        assert_eq!(roles.items[0].model, ModelId(0));
    }

    #[test]
    fn partition_covers_every_model() {
        let tree = ModelTree::build(30, 2).unwrap();
        let roles = RoleAssignment::assign(&tree);
        assert_eq!(roles.producers.len() + roles.items.len(), tree.len());

        for producer in &roles.producers {
            let model = tree.get(producer.produces).unwrap();
            assert_eq!(producer.consumes, model.children);
        }
        for (k, item) in roles.items.iter().enumerate() {
            assert_eq!(item.id, ItemId(k));
            assert!(tree.get(item.model).unwrap().is_leaf());
        }
    }
}
