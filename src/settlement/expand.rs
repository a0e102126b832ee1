//! Settlement expansion into a chosen terrain.

use tracing::debug;

use crate::board::{Board, CellId, Terrain};
use crate::config::Rules;
use crate::player::{PieceKind, Player};

use super::flood::unowned_region;
use super::{SettlementError, SettlementId};

/// What a successful expansion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOutcome {
    pub cells_added: usize,
    pub pieces_used: u32,
    pub points: u32,
}

/// Unowned topmost cells of `terrain` an expansion of `id` would claim.
///
/// Seeds are the `terrain` cells bordering the settlement's live cells;
/// the region then grows transitively through matching unowned cells.
pub fn expansion_targets(board: &Board, id: SettlementId, terrain: Terrain) -> Vec<CellId> {
    if !terrain.is_habitable() {
        return Vec::new();
    }
    let Some(settlement) = board.settlement(id) else {
        return Vec::new();
    };
    let seeds: Vec<CellId> = settlement
        .cells()
        .iter()
        .filter(|&&c| board.is_topmost(c))
        .flat_map(|&c| board.topmost_neighbors(board.cell(c).location.column()))
        .collect();
    unowned_region(board, seeds, terrain)
}

/// Grows a settlement into every reachable cell of `terrain`.
///
/// All or nothing: when the player cannot pay for every reached cell no
/// cell is claimed and no piece is spent. Points are doubled while the
/// settlement's shaman is active.
pub fn expand(
    board: &mut Board,
    player: &mut Player,
    rules: &Rules,
    id: SettlementId,
    terrain: Terrain,
) -> Result<ExpansionOutcome, SettlementError> {
    let has_shaman = board
        .settlement(id)
        .ok_or(SettlementError::UnknownSettlement(id))?
        .has_shaman();

    let reached = expansion_targets(board, id, terrain);
    if reached.is_empty() {
        return Err(SettlementError::NoHexesToExpandTo);
    }

    let (cost, mut points) = reached.iter().fold((0, 0), |(cost, points), &cell| {
        let level = board.cell(cell).location.level();
        (
            cost + rules.expansion.cost(level),
            points + rules.expansion.points(level),
        )
    });
    if has_shaman {
        points *= 2;
    }
    player.ensure(PieceKind::Settler, cost)?;

    for &cell in &reached {
        board.claim(cell, id);
    }
    player.spend(PieceKind::Settler, cost)?;
    player.award(points);

    debug!(
        settlement = id.0,
        ?terrain,
        cells = reached.len(),
        cost,
        points,
        "settlement expanded"
    );
    Ok(ExpansionOutcome {
        cells_added: reached.len(),
        pieces_used: cost,
        points,
    })
}
