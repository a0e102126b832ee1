//! Board representation.
//!
//! Contains the hex geometry, terrains, tiles and cells, the sparse
//! three-dimensional board store, and structural invariant checks.

pub mod coord;
pub mod invariants;
pub mod state;
pub mod terrain;
pub mod tile;

pub use coord::{
    adjacent_columns, Column, Location, Orientation, ALL_ORIENTATIONS, COORD_LIMIT, HEIGHT_LIMIT,
    NEIGHBOR_OFFSETS,
};
pub use invariants::{check_invariants, InvariantViolation};
pub use state::Board;
pub use terrain::{Terrain, ALL_TERRAINS};
pub use tile::{Cell, CellId, PlacedTile, Tile, TileId, FIRST_TILE_LAYOUT};
