//! Flood fills over the topmost layer.
//!
//! Buried cells are invisible here: traversal only ever steps from a
//! column's topmost cell to the topmost cells of the surrounding columns.

use std::collections::{HashSet, VecDeque};

use crate::board::{Board, CellId, Terrain};

use super::SettlementId;

fn open(board: &Board, cell: CellId, terrain: Terrain) -> bool {
    let c = board.cell(cell);
    c.terrain == terrain && c.settlement.is_none() && board.is_topmost(cell)
}

/// Unowned topmost cells of `terrain` connected to any of `seeds`.
///
/// Seeds that are owned, buried or of another terrain are ignored. The
/// result is in discovery order and never contains duplicates.
pub fn unowned_region<I>(board: &Board, seeds: I, terrain: Terrain) -> Vec<CellId>
where
    I: IntoIterator<Item = CellId>,
{
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    for seed in seeds {
        if open(board, seed, terrain) && seen.insert(seed) {
            queue.push_back(seed);
        }
    }

    let mut region = Vec::new();
    while let Some(cell) = queue.pop_front() {
        region.push(cell);
        let column = board.cell(cell).location.column();
        for next in board.topmost_neighbors(column) {
            if open(board, next, terrain) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    region
}

/// Settlements owning a topmost cell next to `region`, lowest id first.
pub fn bordering_settlements(board: &Board, region: &[CellId]) -> Vec<SettlementId> {
    let mut found: Vec<SettlementId> = region
        .iter()
        .flat_map(|&cell| board.topmost_neighbors(board.cell(cell).location.column()))
        .filter_map(|n| board.cell(n).settlement)
        .collect();
    found.sort();
    found.dedup();
    found
}
