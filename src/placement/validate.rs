//! Ordered legality checks for a tile footprint.

use crate::board::{adjacent_columns, Board, Location, Orientation, Terrain, Tile};
use crate::settlement::StructureKind;

use super::PlacementError;

/// Advisory legality check: never mutates the board.
///
/// The tile's terrains do not influence legality; only its footprint does.
pub fn can_place(
    board: &Board,
    _tile: Tile,
    volcano: Location,
    orientation: Orientation,
) -> Result<(), PlacementError> {
    check_footprint(board, &footprint_of(volcano, orientation)?)
}

/// The `[volcano, left, right]` cells of a tile, refusing volcanoes whose
/// footprint would leave the coordinate range.
pub fn footprint_of(
    volcano: Location,
    orientation: Orientation,
) -> Result<[Location; 3], PlacementError> {
    if !volcano.in_bounds() {
        return Err(PlacementError::OutOfBounds(volcano));
    }
    Ok(orientation.footprint(volcano))
}

/// Runs every placement rule against a `[volcano, left, right]` footprint.
pub fn check_footprint(board: &Board, footprint: &[Location; 3]) -> Result<(), PlacementError> {
    if let Some(&far) = footprint.iter().find(|l| !l.in_bounds()) {
        return Err(PlacementError::OutOfBounds(far));
    }
    if !board.has_first_tile() {
        return Err(PlacementError::FirstTileNotYetPlaced);
    }
    check_shape(footprint)?;

    if let Some(&taken) = footprint.iter().find(|&&l| board.lookup(l).is_some()) {
        return Err(PlacementError::HexAlreadyOccupied(taken));
    }

    if footprint[0].height == 0 {
        check_base_layer(board, footprint)
    } else {
        check_upper_layer(board, footprint)
    }
}

fn check_shape(footprint: &[Location; 3]) -> Result<(), PlacementError> {
    let [a, b, c] = *footprint;
    let level = a.height == b.height && b.height == c.height;
    let triangle = a.column().is_adjacent(b.column())
        && b.column().is_adjacent(c.column())
        && a.column().is_adjacent(c.column());
    if level && triangle {
        Ok(())
    } else {
        Err(PlacementError::MalformedFootprint)
    }
}

/// A sea-level tile must touch a column holding land at any height.
fn check_base_layer(board: &Board, footprint: &[Location; 3]) -> Result<(), PlacementError> {
    let touches = adjacent_columns(footprint)
        .into_iter()
        .any(|col| board.topmost(col).is_some());
    if touches {
        Ok(())
    } else {
        Err(PlacementError::TileNotAdjacent)
    }
}

fn check_upper_layer(board: &Board, footprint: &[Location; 3]) -> Result<(), PlacementError> {
    let mut beneath = Vec::with_capacity(3);
    for loc in footprint {
        let cell = loc.below().and_then(|b| board.lookup(b));
        match cell {
            Some(cell) => beneath.push(cell),
            None => return Err(PlacementError::AirBelowTile(*loc)),
        }
    }

    if beneath[0].terrain != Terrain::Volcano {
        return Err(PlacementError::VolcanoMismatch(footprint[0]));
    }

    let owner = beneath[0].tile;
    if beneath.iter().all(|c| c.tile == owner) {
        return Err(PlacementError::CompleteOverlap(owner));
    }

    for cell in &beneath {
        let Some(settlement) = cell.settlement.and_then(|id| board.settlement(id)) else {
            continue;
        };
        for kind in [StructureKind::Sanctuary, StructureKind::Playground] {
            if settlement.anchors(kind).any(|at| at == cell.location) {
                return Err(PlacementError::StructureWouldBeCrushed {
                    kind,
                    at: cell.location,
                });
            }
        }
    }

    Ok(())
}
