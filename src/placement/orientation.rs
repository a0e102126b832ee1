//! Orientation search for planners that must stack over a volcano.

use crate::board::{Board, Location, Orientation, Terrain, Tile, ALL_ORIENTATIONS};

use super::{can_place, PlacementError};

/// Finds the first orientation that stacks a tile one layer above
/// `volcano` while its left or right cell covers the column of `adjacent`.
///
/// Orientations are tried in enumeration order; the first legal match wins.
pub fn resolve_orientation(
    board: &Board,
    volcano: Location,
    adjacent: Location,
) -> Result<Orientation, PlacementError> {
    if !volcano.in_bounds() {
        return Err(PlacementError::OutOfBounds(volcano));
    }
    let any_tile = Tile {
        left: Terrain::Grassland,
        right: Terrain::Rocky,
    };
    let target = volcano.above();

    ALL_ORIENTATIONS
        .into_iter()
        .filter(|o| o.left_of(volcano) == adjacent || o.right_of(volcano) == adjacent)
        .find(|&o| can_place(board, any_tile, target, o).is_ok())
        .ok_or(PlacementError::NoValidOrientation { volcano, adjacent })
}
