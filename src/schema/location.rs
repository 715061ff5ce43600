use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a facility location.
///
/// Grid cells are numbered row-major from 0; the two sentinels have no
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationId {
    Storage,
    Charging,
    Cell(usize),
}

impl LocationId {
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Cell(_))
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage => f.write_str("locstorage"),
            Self::Charging => f.write_str("loccharging"),
            Self::Cell(n) => write!(f, "loc{}", n),
        }
    }
}

/// Row and column of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub row: usize,
    pub column: usize,
}

/// A point of the facility with its outgoing paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub coords: Option<Coords>,
    /// Outgoing `hasPathTo` edges in emission order.
    pub paths: Vec<LocationId>,
}

impl Location {
    pub fn sentinel(id: LocationId) -> Self {
        Self {
            id,
            coords: None,
            paths: Vec::new(),
        }
    }

    pub fn has_path_to(&self, other: LocationId) -> bool {
        self.paths.contains(&other)
    }
}
