//! Property tests for tree shape, role partition and grid adjacency.

use plant_benchgen::core::grid::{neighbors, GridLayout, NeighborPolicy};
use plant_benchgen::core::pipeline::ScenarioGenerator;
use plant_benchgen::core::tree::{level_bound, ModelTree};
use plant_benchgen::schema::entity::WorkstationId;
use plant_benchgen::schema::location::LocationId;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Most models a tree with `levels` levels and fan-out `k` can hold.
fn capacity(levels: u32, k: usize) -> usize {
    let mut total: usize = 1;
    let mut width: usize = 1;
    for _ in 1..levels {
        width = width.saturating_mul(k);
        total = total.saturating_add(width);
    }
    total
}

fn policy() -> impl Strategy<Value = NeighborPolicy> {
    prop_oneof![Just(NeighborPolicy::RowBounded), Just(NeighborPolicy::RowWrapping)]
}

proptest! {
    #[test]
    fn tree_respects_count_and_depth(n in 1usize..400, k in 1usize..5) {
        let tree = ModelTree::build(n, k).unwrap();
        let bound = level_bound(n);

        prop_assert!(tree.len() <= n);
        prop_assert!(tree.depth() <= bound);
        prop_assert!(tree.models.iter().all(|m| m.children.len() <= k));

        let levels = bound.max(1) as u32;
        if capacity(levels, k) >= n {
            prop_assert_eq!(tree.len(), n);
        }
    }

    #[test]
    fn roles_partition_the_models(n in 1usize..300, k in 1usize..4, seed in any::<u64>()) {
        let s = ScenarioGenerator::builder()
            .branching_factor(k)
            .seed(seed)
            .build()
            .unwrap()
            .generate(n)
            .unwrap();

        prop_assert_eq!(s.workstations.len() + s.items.len(), s.realized());

        for ws in &s.workstations {
            let model = s.model(ws.produces).unwrap();
            let consumed: BTreeSet<_> = ws.consumes.iter().copied().collect();
            let children: BTreeSet<_> = model.children.iter().copied().collect();
            prop_assert!(!children.is_empty());
            prop_assert_eq!(consumed, children);
        }
        for item in &s.items {
            prop_assert!(s.model(item.model).unwrap().is_leaf());
            prop_assert_eq!(item.location, LocationId::Storage);
        }

        let produced: BTreeSet<_> = s.workstations.iter().map(|w| w.produces).collect();
        prop_assert_eq!(produced.len(), s.workstations.len());
    }

    #[test]
    fn placement_is_a_partial_injection(
        count in 0usize..120,
        seed in any::<u64>(),
        policy in policy(),
    ) {
        let ids: Vec<WorkstationId> = (0..count).map(WorkstationId).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = GridLayout::place(&ids, policy, &mut rng);

        prop_assert!(layout.width * layout.width >= count);
        let cells: BTreeSet<_> = ids.iter().map(|id| layout.location_of(*id).unwrap()).collect();
        prop_assert_eq!(cells.len(), count);
        prop_assert!(cells.iter().all(|c| !c.is_sentinel()));
    }

    #[test]
    fn paths_are_symmetric(count in 0usize..120, seed in any::<u64>(), policy in policy()) {
        let ids: Vec<WorkstationId> = (0..count).map(WorkstationId).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = GridLayout::place(&ids, policy, &mut rng);

        for loc in &layout.locations {
            for to in &loc.paths {
                let back = layout.location(*to).unwrap();
                prop_assert!(back.has_path_to(loc.id), "{} -> {} has no way back", loc.id, to);
            }
        }
    }
}

#[test]
fn neighbor_relation_is_symmetric_for_small_grids() {
    for policy in [NeighborPolicy::RowBounded, NeighborPolicy::RowWrapping] {
        for width in 1..=10 {
            let cells = width * width;
            for n in 0..cells {
                for m in neighbors(n, width, policy) {
                    assert!(m < cells);
                    assert_ne!(m, n);
                    assert!(
                        neighbors(m, width, policy).contains(&n),
                        "{:?} width {}: {} -> {} not mirrored",
                        policy,
                        width,
                        n,
                        m
                    );
                }
            }
        }
    }
}
