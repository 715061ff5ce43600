//! Facility layout: workstation placement and path topology.

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::entity::WorkstationId;
use crate::schema::location::{Coords, Location, LocationId};

/// How left/right neighbours are computed at the row borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NeighborPolicy {
    /// Left/right neighbours stay in the same row.
    #[default]
    RowBounded,
    /// `n - 1` and `n + 1` are neighbours whenever they are inside the
    /// grid, so the first and last cells of adjacent rows get linked.
    /// Useful for feeding planners degenerate topologies.
    RowWrapping,
}

/// Smallest `w` with `w * w >= n`.
pub fn ceil_sqrt(n: usize) -> usize {
    let mut w = (n as f64).sqrt() as usize;
    while w * w < n {
        w += 1;
    }
    while w > 0 && (w - 1) * (w - 1) >= n {
        w -= 1;
    }
    w
}

/// Grid neighbours of cell `n` in up, down, left, right order.
pub fn neighbors(n: usize, width: usize, policy: NeighborPolicy) -> Vec<usize> {
    let cells = width * width;
    let mut out = Vec::with_capacity(4);
    if n >= cells {
        return out;
    }

    if n >= width {
        out.push(n - width);
    }
    if n + width < cells {
        out.push(n + width);
    }

    let column = n % width;
    let (has_left, has_right) = match policy {
        NeighborPolicy::RowBounded => (column > 0, column + 1 < width),
        NeighborPolicy::RowWrapping => (n > 0, n + 1 < cells),
    };
    if has_left {
        out.push(n - 1);
    }
    if has_right {
        out.push(n + 1);
    }

    out
}

/// Uniform permutation by sorting on independent random keys.
pub fn weighted_key_shuffle<T, R>(items: Vec<T>, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let mut keyed: Vec<(f64, T)> = items
        .into_iter()
        .map(|item| (rng.gen::<f64>(), item))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Workstations laid out on a `width x width` grid plus the two sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub width: usize,
    pub policy: NeighborPolicy,
    /// Occupant of each cell, row-major.
    pub cells: Vec<Option<WorkstationId>>,
    /// Storage, charging, then every cell.
    pub locations: Vec<Location>,
    placement: FxHashMap<WorkstationId, LocationId>,
}

impl GridLayout {
    /// Shuffle `workstations` with `rng` and lay them out row by row.
    ///
    /// Cell 0 is the entry point: it is linked both ways with storage and
    /// charging. Without workstations there are no cells and the sentinels
    /// stay unconnected.
    pub fn place<R>(
        workstations: &[WorkstationId],
        policy: NeighborPolicy,
        rng: &mut R,
    ) -> GridLayout
    where
        R: Rng + ?Sized,
    {
        let width = ceil_sqrt(workstations.len());
        let cell_count = width * width;

        let shuffled = weighted_key_shuffle(workstations.to_vec(), rng);
        let mut cells = vec![None; cell_count];
        let mut placement = FxHashMap::default();
        for (n, ws) in shuffled.into_iter().enumerate() {
            cells[n] = Some(ws);
            placement.insert(ws, LocationId::Cell(n));
        }

        let mut storage = Location::sentinel(LocationId::Storage);
        let mut charging = Location::sentinel(LocationId::Charging);
        let mut grid: Vec<Location> = (0..cell_count)
            .map(|n| Location {
                id: LocationId::Cell(n),
                coords: Some(Coords {
                    row: n / width,
                    column: n % width,
                }),
                paths: neighbors(n, width, policy)
                    .into_iter()
                    .map(LocationId::Cell)
                    .collect(),
            })
            .collect();

        if let Some(entry) = grid.first_mut() {
            entry.paths.push(LocationId::Storage);
            entry.paths.push(LocationId::Charging);
            storage.paths.push(entry.id);
            charging.paths.push(entry.id);
        }

        let mut locations = Vec::with_capacity(cell_count + 2);
        locations.push(storage);
        locations.push(charging);
        locations.append(&mut grid);

        GridLayout {
            width,
            policy,
            cells,
            locations,
            placement,
        }
    }

    pub fn location_of(&self, ws: WorkstationId) -> Option<LocationId> {
        self.placement.get(&ws).copied()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }
}
