//! Planning queries.
//!
//! Enumerates legal tile placements and settleable cells for bots and
//! randomized tests. Nothing here mutates the board.

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::board::{Board, Location, Orientation, Terrain, Tile, ALL_ORIENTATIONS, ALL_TERRAINS};
use crate::placement::can_place;

/// A volcano location plus the rotation of the tile around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    pub volcano: Location,
    pub orientation: Orientation,
}

/// Every placement worth probing: sea-level volcano slots within two
/// columns of the island, and slots directly above each topmost volcano.
fn candidates(board: &Board) -> Vec<Placement> {
    let mut slots: Vec<Location> = Vec::new();
    for column in board.columns() {
        for near in column.neighbors() {
            for far in near.neighbors().into_iter().chain([near]) {
                if board.topmost(far).is_none() {
                    slots.push(far.at(0));
                }
            }
        }
        if let Some(top) = board.topmost(column) {
            if top.terrain == Terrain::Volcano {
                slots.push(top.location.above());
            }
        }
    }
    slots.sort();
    slots.dedup();

    slots
        .into_iter()
        .flat_map(|volcano| {
            ALL_ORIENTATIONS
                .into_iter()
                .map(move |orientation| Placement {
                    volcano,
                    orientation,
                })
        })
        .collect()
}

/// All legal placements, in ascending order.
pub fn legal_placements(board: &Board) -> Vec<Placement> {
    let any_tile = Tile {
        left: Terrain::Grassland,
        right: Terrain::Rocky,
    };
    candidates(board)
        .into_par_iter()
        .filter(|p| can_place(board, any_tile, p.volcano, p.orientation).is_ok())
        .collect()
}

/// A uniformly random legal placement, or `None` if nothing fits.
pub fn random_placement(board: &Board, rng: &mut impl Rng) -> Option<Placement> {
    legal_placements(board).choose(rng).copied()
}

/// A tile with two random habitable terrains.
pub fn random_tile(rng: &mut impl Rng) -> Tile {
    let habitable = &ALL_TERRAINS[1..];
    Tile {
        left: habitable[rng.gen_range(0..habitable.len())],
        right: habitable[rng.gen_range(0..habitable.len())],
    }
}

/// Topmost, habitable, unowned cells: every location `found` could accept.
pub fn foundable_cells(board: &Board) -> Vec<Location> {
    let mut cells: Vec<Location> = board
        .columns()
        .filter_map(|col| board.topmost(col))
        .filter(|c| c.terrain.is_habitable() && c.settlement.is_none())
        .map(|c| c.location)
        .collect();
    cells.sort();
    cells
}
