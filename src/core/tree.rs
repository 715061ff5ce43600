//! Bill-of-materials tree construction.

use thiserror::Error;

use crate::schema::entity::{Model, ModelId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("model count must be a positive integer, got {0}")]
    InvalidModelCount(usize),
    #[error("branching factor must be at least 1, got {0}")]
    InvalidBranchingFactor(usize),
}

/// Maximum number of tree levels for a target count: `ceil(log2(n))`.
///
/// The root level is always built, so a bound of 0 or 1 both yield a
/// single-node tree.
pub fn level_bound(target: usize) -> usize {
    if target <= 1 {
        0
    } else {
        (usize::BITS - (target - 1).leading_zeros()) as usize
    }
}

/// A bill-of-materials tree rooted at `model0`.
///
/// Models are stored in creation order, which is breadth-first, so
/// `models[k].id == ModelId(k)` and every child has a larger index than
/// its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTree {
    pub models: Vec<Model>,
    pub target: usize,
    pub branching_factor: usize,
}

impl ModelTree {
    /// Build a tree of up to `target` models, giving each node up to
    /// `branching_factor` children per level.
    ///
    /// Fewer than `target` models come back when the level bound runs out
    /// first. Callers see this through [`ModelTree::is_underrun`].
    pub fn build(target: usize, branching_factor: usize) -> Result<ModelTree, TreeError> {
        if target == 0 {
            return Err(TreeError::InvalidModelCount(target));
        }
        if branching_factor == 0 {
            return Err(TreeError::InvalidBranchingFactor(branching_factor));
        }

        let mut models = vec![Model {
            id: ModelId(0),
            children: Vec::new(),
            depth: 0,
        }];
        let max_levels = level_bound(target);
        let mut frontier = vec![ModelId(0)];
        let mut level = 1;

        while level < max_levels && !frontier.is_empty() && models.len() < target {
            frontier = expand_level(&mut models, &frontier, level, target, branching_factor);
            level += 1;
        }

        Ok(ModelTree {
            models,
            target,
            branching_factor,
        })
    }

    pub fn root(&self) -> &Model {
        &self.models[0]
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn is_underrun(&self) -> bool {
        self.models.len() < self.target
    }

    /// Largest edge distance from the root.
    pub fn depth(&self) -> usize {
        self.models.iter().map(|m| m.depth).max().unwrap_or(0)
    }

    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0)
    }
}

/// Give each frontier node its children and return the next frontier.
///
/// `models` is the accumulator; a level stops filling as soon as it
/// holds `target` models.
fn expand_level(
    models: &mut Vec<Model>,
    frontier: &[ModelId],
    level: usize,
    target: usize,
    branching_factor: usize,
) -> Vec<ModelId> {
    let mut next = Vec::new();

    for parent in frontier {
        for _ in 0..branching_factor {
            if models.len() >= target {
                return next;
            }
            let child = ModelId(models.len());
            models.push(Model {
                id: child,
                children: Vec::new(),
                depth: level,
            });
            models[parent.0].children.push(child);
            next.push(child);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bound_matches_ceil_log2() {
        assert_eq!(level_bound(1), 0);
        assert_eq!(level_bound(2), 1);
        assert_eq!(level_bound(3), 2);
        assert_eq!(level_bound(4), 2);
        assert_eq!(level_bound(5), 3);
        assert_eq!(level_bound(8), 3);
        assert_eq!(level_bound(9), 4);
        assert_eq!(level_bound(1024), 10);
        assert_eq!(level_bound(1025), 11);
        assert_eq!(level_bound(usize::MAX), usize::BITS as usize);
    }

    #[test]
    fn huge_target_is_bounded_by_depth() {
        let tree = ModelTree::build(usize::MAX, 1).unwrap();
        assert_eq!(tree.len(), usize::BITS as usize);
        assert!(tree.is_underrun());
    }

    #[test]
    fn rejects_zero_count() {
        assert_eq!(ModelTree::build(0, 1), Err(TreeError::InvalidModelCount(0)));
    }

    #[test]
    fn rejects_zero_branching() {
        assert_eq!(
            ModelTree::build(5, 0),
            Err(TreeError::InvalidBranchingFactor(0))
        );
    }

    #[test]
    fn single_model_is_root_only() {
        let tree = ModelTree::build(1, 1).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.root().is_leaf());
        assert!(!tree.is_underrun());
    }

    #[test]
    fn chain_of_four_is_two_levels() {
        let tree = ModelTree::build(4, 1).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root().children, vec![ModelId(1)]);
        assert_eq!(tree.depth(), 1);
        assert!(tree.is_underrun());
    }

    #[test]
    fn binary_tree_fills_levels() {
        let tree = ModelTree::build(7, 2).unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.root().children, vec![ModelId(1), ModelId(2)]);
        assert_eq!(tree.models[1].children, vec![ModelId(3), ModelId(4)]);
        assert_eq!(tree.models[2].children, vec![ModelId(5), ModelId(6)]);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn last_level_may_be_partial() {
        // bound is 3 levels, third level stops after two nodes
        let tree = ModelTree::build(5, 2).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.models[1].children, vec![ModelId(3), ModelId(4)]);
        assert!(tree.models[2].is_leaf());
    }

    #[test]
    fn every_non_root_has_one_parent() {
        let tree = ModelTree::build(40, 3).unwrap();
        assert!(tree.models.iter().all(|m| !m.children.contains(&ModelId(0))));
        for k in 1..tree.len() {
            let parents: Vec<&Model> = tree
                .models
                .iter()
                .filter(|m| m.children.contains(&ModelId(k)))
                .collect();
            assert_eq!(parents.len(), 1, "model{} has {} parents", k, parents.len());
            assert!(parents[0].id.0 < k);
        }
    }
}
