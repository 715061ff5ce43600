use rustc_hash::FxHashMap;

use super::entity::{
    EntityRef, Item, ItemId, Model, ModelId, TransportationDevice, Workstation, WorkstationId,
};
use super::location::{Location, LocationId};

/// The complete entity set of one generation run.
///
/// Entities refer to each other only by identifier. The emitters resolve
/// those identifiers through the accessors below, so every output format
/// projects the same canonical object graph.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Model count asked for by the caller.
    pub requested: usize,
    /// Seed of the placement shuffle.
    pub seed: u64,
    pub grid_width: usize,
    pub models: Vec<Model>,
    pub workstations: Vec<Workstation>,
    pub items: Vec<Item>,
    /// Storage, charging, then grid cells in row-major order.
    pub locations: Vec<Location>,
    pub device: TransportationDevice,
    index: FxHashMap<String, EntityRef>,
}

impl Scenario {
    pub fn new(
        requested: usize,
        seed: u64,
        grid_width: usize,
        models: Vec<Model>,
        workstations: Vec<Workstation>,
        items: Vec<Item>,
        locations: Vec<Location>,
    ) -> Self {
        let mut scenario = Self {
            requested,
            seed,
            grid_width,
            models,
            workstations,
            items,
            locations,
            device: TransportationDevice::default(),
            index: FxHashMap::default(),
        };
        scenario.index = scenario
            .entities()
            .map(|entity| (entity.to_string(), entity))
            .collect();
        scenario
    }

    /// Root of the model tree.
    pub fn root(&self) -> ModelId {
        ModelId(0)
    }

    /// Number of models actually generated. Below `requested` on underrun.
    pub fn realized(&self) -> usize {
        self.models.len()
    }

    pub fn is_underrun(&self) -> bool {
        self.realized() < self.requested
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0)
    }

    pub fn workstation(&self, id: WorkstationId) -> Option<&Workstation> {
        self.workstations.get(id.0)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        let slot = match id {
            LocationId::Storage => 0,
            LocationId::Charging => 1,
            LocationId::Cell(n) => n + 2,
        };
        self.locations.get(slot).filter(|loc| loc.id == id)
    }

    /// Look an entity up by its identifier, e.g. `"workstation2"`.
    pub fn resolve(&self, id: &str) -> Option<EntityRef> {
        self.index.get(id).copied()
    }

    /// All entities in canonical order: models, workstations, items,
    /// locations, then the device.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef> + '_ {
        let models = self.models.iter().map(|m| EntityRef::Model(m.id));
        let workstations = self.workstations.iter().map(|w| EntityRef::Workstation(w.id));
        let items = self.items.iter().map(|i| EntityRef::Item(i.id));
        let locations = self.locations.iter().map(|l| EntityRef::Location(l.id));
        models
            .chain(workstations)
            .chain(items)
            .chain(locations)
            .chain(std::iter::once(EntityRef::Device))
    }

    /// Identifiers of all entities, in canonical order.
    pub fn entity_ids(&self) -> Vec<String> {
        self.entities().map(|e| e.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::entity::Status;
    use crate::schema::location::Coords;

    fn tiny_scenario() -> Scenario {
        let models = vec![
            Model {
                id: ModelId(0),
                children: vec![ModelId(1)],
                depth: 0,
            },
            Model {
                id: ModelId(1),
                children: Vec::new(),
                depth: 1,
            },
        ];
        let workstations = vec![Workstation {
            id: WorkstationId(0),
            status: Status::Off,
            produces: ModelId(0),
            consumes: vec![ModelId(1)],
            location: LocationId::Cell(0),
        }];
        let items = vec![Item {
            id: ItemId(0),
            model: ModelId(1),
            location: LocationId::Storage,
        }];
        let locations = vec![
            Location::sentinel(LocationId::Storage),
            Location::sentinel(LocationId::Charging),
            Location {
                id: LocationId::Cell(0),
                coords: Some(Coords { row: 0, column: 0 }),
                paths: Vec::new(),
            },
        ];
        Scenario::new(4, 7, 1, models, workstations, items, locations)
    }

    #[test]
    fn lookup_table_covers_every_entity() {
        let scenario = tiny_scenario();
        assert_eq!(
            scenario.entity_ids(),
            vec![
                "model0",
                "model1",
                "workstation0",
                "item0",
                "locstorage",
                "loccharging",
                "loc0",
                "agv",
            ]
        );
        for id in scenario.entity_ids() {
            assert!(scenario.resolve(&id).is_some(), "unresolved {}", id);
        }
        assert_eq!(
            scenario.resolve("workstation0"),
            Some(EntityRef::Workstation(WorkstationId(0)))
        );
        assert_eq!(scenario.resolve("model9"), None);
    }

    #[test]
    fn location_accessor_matches_ids() {
        let scenario = tiny_scenario();
        assert_eq!(
            scenario.location(LocationId::Charging).unwrap().id,
            LocationId::Charging
        );
        assert_eq!(
            scenario.location(LocationId::Cell(0)).unwrap().id,
            LocationId::Cell(0)
        );
        assert!(scenario.location(LocationId::Cell(1)).is_none());
    }

    #[test]
    fn underrun_is_reported() {
        let scenario = tiny_scenario();
        assert_eq!(scenario.realized(), 2);
        assert!(scenario.is_underrun());
        assert_eq!(scenario.workstation(WorkstationId(0)).unwrap().produces, ModelId(0));
        assert!(scenario.workstation(WorkstationId(1)).is_none());
    }
}
