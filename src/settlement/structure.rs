//! Sanctuaries and playgrounds.
//!
//! Eligibility is data-driven: each structure kind maps to a `StructureRule`
//! naming the piece it consumes, the minimum live size of the hosting
//! settlement and the minimum height of the target cell.

use tracing::debug;

use crate::board::{Board, CellId, Location, Terrain};
use crate::config::{Rules, StructureRule};
use crate::player::Player;

use super::{SettlementError, SettlementId, StructureKind};

/// Builds a structure on the cell at `at`.
///
/// A cell that already belongs to a settlement can only host a structure
/// for that settlement. An unowned cell may serve any neighboring
/// settlement; the lowest-id eligible one is chosen and the cell joins it.
pub fn build(
    board: &mut Board,
    player: &mut Player,
    rules: &Rules,
    kind: StructureKind,
    at: Location,
) -> Result<SettlementId, SettlementError> {
    let rule = *rules.structure(kind);
    let cell = target_cell(board, at, &rule)?;
    player.ensure(rule.piece, 1)?;

    let host = choose_host(board, cell, kind, &rule)?;
    if board.cell(cell).settlement.is_none() {
        board.claim(cell, host);
    }
    board.add_structure(host, kind, at);
    player.spend(rule.piece, 1)?;
    debug!(settlement = host.0, %kind, %at, "structure built");
    Ok(host)
}

fn target_cell(board: &Board, at: Location, rule: &StructureRule) -> Result<CellId, SettlementError> {
    let id = board
        .cell_id_at(at)
        .ok_or(SettlementError::NoHexAtLocation(at))?;
    if board.cell(id).terrain == Terrain::Volcano {
        return Err(SettlementError::HexIsVolcano(at));
    }
    if !board.is_topmost(id) {
        return Err(SettlementError::HexIsCovered(at));
    }
    if at.height < rule.min_height {
        return Err(SettlementError::BuildConditionsNotMet("target cell is too low"));
    }
    Ok(id)
}

fn choose_host(
    board: &Board,
    cell: CellId,
    kind: StructureKind,
    rule: &StructureRule,
) -> Result<SettlementId, SettlementError> {
    let candidates = match board.cell(cell).settlement {
        Some(own) => vec![own],
        None => {
            let mut around: Vec<SettlementId> = board
                .topmost_neighbors(board.cell(cell).location.column())
                .filter_map(|n| board.cell(n).settlement)
                .collect();
            around.sort();
            around.dedup();
            around
        }
    };
    if candidates.is_empty() {
        return Err(SettlementError::BuildConditionsNotMet("no adjacent settlement"));
    }

    let without_kind: Vec<SettlementId> = candidates
        .into_iter()
        .filter(|&id| board.settlement(id).is_some_and(|s| !s.has_structure(kind)))
        .collect();
    if without_kind.is_empty() {
        return Err(SettlementError::BuildConditionsNotMet(match kind {
            StructureKind::Sanctuary => "settlement already has a sanctuary",
            StructureKind::Playground => "settlement already has a playground",
        }));
    }

    without_kind
        .into_iter()
        .find(|&id| board.live_size(id) >= rule.min_settlement_size)
        .ok_or(SettlementError::BuildConditionsNotMet("settlement is too small"))
}
