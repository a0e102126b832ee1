//! Tiles and the cells they contribute to the board.

use super::coord::Location;
use super::terrain::Terrain;
use crate::settlement::SettlementId;

/// Index of a placed tile in the board's tile arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a cell in the board's cell arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

/// A tile waiting to be placed: a volcano plus two terrain cells.
///
/// The volcano is implicit; only the player-chosen terrains are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub left: Terrain,
    pub right: Terrain,
}

impl Tile {
    /// Creates a tile. Returns `None` if either terrain is a volcano.
    pub fn new(left: Terrain, right: Terrain) -> Option<Tile> {
        if left.is_habitable() && right.is_habitable() {
            Some(Tile { left, right })
        } else {
            None
        }
    }

    /// Terrains in footprint order: `[volcano, left, right]`.
    pub const fn terrains(self) -> [Terrain; 3] {
        [Terrain::Volcano, self.left, self.right]
    }
}

/// A placed cell. Cells are never removed or reassigned to another tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub location: Location,
    pub terrain: Terrain,
    pub tile: TileId,
    pub settlement: Option<SettlementId>,
}

/// A tile as recorded on the board, with the cells it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    pub id: TileId,
    pub cells: Vec<CellId>,
}

/// Layout of the fixed starting formation, volcano first.
pub const FIRST_TILE_LAYOUT: [(Location, Terrain); 5] = [
    (Location::new(0, 0, 0), Terrain::Volcano),
    (Location::new(0, 1, 0), Terrain::Jungle),
    (Location::new(1, 1, 0), Terrain::Lake),
    (Location::new(-1, -1, 0), Terrain::Rocky),
    (Location::new(0, -1, 0), Terrain::Grassland),
];
