//! Tile placement.
//!
//! `can_place` is the side-effect-free legality check; `place` validates,
//! strips any shaman anchored on a covered cell, and commits the tile to
//! the board. A rejected placement leaves the board untouched.

pub mod orientation;
pub mod validate;

pub use orientation::resolve_orientation;
pub use validate::{can_place, check_footprint, footprint_of};

use tracing::{debug, info};

use crate::board::{Board, Location, Orientation, Tile, TileId};
use crate::settlement::StructureKind;

/// Why a tile may not be placed. Checks run in declaration order and the
/// first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("the starting tile has already been placed")]
    FirstTileAlreadyPlaced,
    #[error("{0} lies outside the island's coordinate range")]
    OutOfBounds(Location),
    #[error("the starting tile has not been placed yet")]
    FirstTileNotYetPlaced,
    #[error("tile cells must be mutually adjacent on one layer")]
    MalformedFootprint,
    #[error("a cell already exists at {0}")]
    HexAlreadyOccupied(Location),
    #[error("tile does not touch the island")]
    TileNotAdjacent,
    #[error("nothing supports {0}")]
    AirBelowTile(Location),
    #[error("volcano at {0} does not sit on a volcano")]
    VolcanoMismatch(Location),
    #[error("tile would exactly cover tile {0}")]
    CompleteOverlap(TileId),
    #[error("{kind} at {at} would be crushed")]
    StructureWouldBeCrushed { kind: StructureKind, at: Location },
    #[error("no orientation stacks on {volcano} next to {adjacent}")]
    NoValidOrientation { volcano: Location, adjacent: Location },
}

/// Validates and commits a tile whose volcano lands on `volcano`.
pub fn place(
    board: &mut Board,
    tile: Tile,
    volcano: Location,
    orientation: Orientation,
) -> Result<TileId, PlacementError> {
    let footprint = footprint_of(volcano, orientation)?;
    check_footprint(board, &footprint)?;
    bury_shamans(board, &footprint);
    let id = board.insert(tile, footprint);
    debug!(tile = id.0, %volcano, ?orientation, "tile placed");
    Ok(id)
}

/// Clears the shaman of every settlement anchored on a cell about to be covered.
fn bury_shamans(board: &mut Board, footprint: &[Location; 3]) {
    for below in footprint.iter().filter_map(|l| l.below()) {
        let Some(sid) = board.lookup(below).and_then(|c| c.settlement) else {
            continue;
        };
        let anchored = board
            .settlement(sid)
            .is_some_and(|s| s.shaman() == Some(below));
        if anchored {
            board.clear_shaman(sid);
            info!(settlement = sid.0, at = %below, "shaman buried");
        }
    }
}
