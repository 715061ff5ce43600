use serde::{Deserialize, Serialize};
use std::fmt;

use super::location::LocationId;

/// Newtype wrapper for model IDs. Rendered as `model<k>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelId(pub usize);

/// Newtype wrapper for workstation IDs. Rendered as `workstation<k>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkstationId(pub usize);

/// Newtype wrapper for item IDs. Rendered as `item<k>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model{}", self.0)
    }
}

impl fmt::Display for WorkstationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "workstation{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item{}", self.0)
    }
}

/// Identifier of the single transportation device.
pub const DEVICE_ID: &str = "agv";

/// A node of the bill-of-materials tree.
///
/// Leaves are stocked parts, inner nodes are assemblies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub children: Vec<ModelId>,
    /// Edge distance from the root (the root has depth 0).
    pub depth: usize,
}

impl Model {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// On/off state of a workstation.
///
/// The generator only ever emits `Off`; switching a workstation on is a
/// planner action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Off,
    On,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

/// An assembler bound to one non-leaf model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workstation {
    pub id: WorkstationId,
    pub status: Status,
    pub produces: ModelId,
    /// Exactly the children of `produces`, in tree order.
    pub consumes: Vec<ModelId>,
    pub location: LocationId,
}

/// A stocked instance of a leaf model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub model: ModelId,
    pub location: LocationId,
}

/// The AGV that moves items between locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportationDevice {
    pub location: LocationId,
}

impl TransportationDevice {
    pub fn id(&self) -> &'static str {
        DEVICE_ID
    }
}

impl Default for TransportationDevice {
    fn default() -> Self {
        Self {
            location: LocationId::Charging,
        }
    }
}

/// Resolved handle to any generated entity, keyed by its identifier in
/// [`Scenario`](super::scenario::Scenario)'s lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Model(ModelId),
    Workstation(WorkstationId),
    Item(ItemId),
    Location(LocationId),
    Device,
}

impl EntityRef {
    /// Type tag shared by the triple and graph documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Model(_) => "Model",
            Self::Workstation(_) => "Workstation",
            Self::Item(_) => "Item",
            Self::Location(_) => "Location",
            Self::Device => "TransportationDevice",
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(id) => fmt::Display::fmt(id, f),
            Self::Workstation(id) => fmt::Display::fmt(id, f),
            Self::Item(id) => fmt::Display::fmt(id, f),
            Self::Location(id) => fmt::Display::fmt(id, f),
            Self::Device => f.write_str(DEVICE_ID),
        }
    }
}
