//! Founding settlements, with or without the shaman.

use tracing::{debug, info};

use crate::board::{Board, CellId, Location, Terrain};
use crate::player::{PieceKind, Player};

use super::flood::{bordering_settlements, unowned_region};
use super::{SettlementError, SettlementId};

/// Founds a settlement on the cell at `at`.
///
/// The whole unowned same-terrain region around the cell is claimed. If the
/// region touches existing settlements they are merged into the one with
/// the lowest id and the region joins it; otherwise a new settlement is
/// created. Costs one settler and scores one point.
pub fn found(
    board: &mut Board,
    player: &mut Player,
    at: Location,
) -> Result<SettlementId, SettlementError> {
    let cell = foundable_cell(board, at)?;
    player.ensure(PieceKind::Settler, 1)?;

    let id = settle(board, cell);
    player.spend(PieceKind::Settler, 1)?;
    player.award(1);
    debug!(settlement = id.0, %at, "settlement founded");
    Ok(id)
}

/// Founds a settlement and anchors the player's shaman on `at`.
pub fn found_with_shaman(
    board: &mut Board,
    player: &mut Player,
    at: Location,
) -> Result<SettlementId, SettlementError> {
    player.ensure(PieceKind::Shaman, 1)?;
    if at.height > 0 {
        return Err(SettlementError::ShamanOnUpperLevel(at));
    }

    let id = found(board, player, at)?;
    player.spend(PieceKind::Shaman, 1)?;
    board.set_shaman(id, at);
    info!(settlement = id.0, %at, "shaman placed");
    Ok(id)
}

fn foundable_cell(board: &Board, at: Location) -> Result<CellId, SettlementError> {
    let id = board
        .cell_id_at(at)
        .ok_or(SettlementError::NoHexAtLocation(at))?;
    let cell = board.cell(id);
    if cell.terrain == Terrain::Volcano {
        return Err(SettlementError::HexIsVolcano(at));
    }
    if cell.settlement.is_some() {
        return Err(SettlementError::SettlementAlreadyExists(at));
    }
    if !board.is_topmost(id) {
        return Err(SettlementError::HexIsCovered(at));
    }
    Ok(id)
}

fn settle(board: &mut Board, cell: CellId) -> SettlementId {
    let terrain = board.cell(cell).terrain;
    let region = unowned_region(board, [cell], terrain);
    let bordering = bordering_settlements(board, &region);

    let target = match bordering.split_first() {
        Some((&first, rest)) => {
            for &other in rest {
                board.merge_settlements(first, other);
            }
            first
        }
        None => board.create_settlement(terrain),
    };
    for &c in &region {
        board.claim(c, target);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{check_invariants, Orientation, Tile};
    use crate::placement::place;
    use crate::player::{Inventory, PieceError};

    fn setup() -> (Board, Player) {
        (Board::with_first_tile(), Player::default())
    }

    fn put(board: &mut Board, left: Terrain, right: Terrain, at: Location, o: Orientation) {
        place(board, Tile::new(left, right).unwrap(), at, o).unwrap();
    }

    #[test]
    fn founding_costs_a_settler_and_scores_one() {
        let (mut board, mut player) = setup();
        let id = found(&mut board, &mut player, Location::new(0, 1, 0)).unwrap();
        assert_eq!(player.score(), 1);
        assert_eq!(player.remaining(PieceKind::Settler), 19);
        assert_eq!(board.settlement(id).unwrap().size(), 1);
        assert_eq!(board.settlement_at(Location::new(0, 1, 0)).unwrap().id(), id);
    }

    #[test]
    fn founding_claims_the_whole_region() {
        let (mut board, mut player) = setup();
        put(
            &mut board,
            Terrain::Grassland,
            Terrain::Grassland,
            Location::new(1, -2, 0),
            Orientation::WestSouthwest,
        );
        let id = found(&mut board, &mut player, Location::new(0, -1, 0)).unwrap();
        assert_eq!(board.settlement(id).unwrap().size(), 3);
        assert_eq!(player.score(), 1);
        assert_eq!(
            found(&mut board, &mut player, Location::new(0, -3, 0)),
            Err(SettlementError::SettlementAlreadyExists(Location::new(0, -3, 0)))
        );
    }

    #[test]
    fn founding_next_to_a_settlement_joins_it() {
        let (mut board, mut player) = setup();
        let lake = found(&mut board, &mut player, Location::new(1, 1, 0)).unwrap();
        let jungle = found(&mut board, &mut player, Location::new(0, 1, 0)).unwrap();
        assert_eq!(lake, jungle);
        assert_eq!(board.settlement(lake).unwrap().size(), 2);
        assert_eq!(player.score(), 2);
        assert_eq!(player.remaining(PieceKind::Settler), 18);
    }

    #[test]
    fn bridging_region_merges_settlements() {
        let (mut board, mut player) = setup();
        put(
            &mut board,
            Terrain::Paddy,
            Terrain::Paddy,
            Location::new(2, 0, 0),
            Orientation::WestSouthwest,
        );
        let lake = found(&mut board, &mut player, Location::new(1, 1, 0)).unwrap();
        let grass = found(&mut board, &mut player, Location::new(0, -1, 0)).unwrap();
        assert_ne!(lake, grass);

        let merged = found(&mut board, &mut player, Location::new(1, 0, 0)).unwrap();
        assert_eq!(merged, lake);
        assert_eq!(board.settlement(lake).unwrap().size(), 4);
        assert_eq!(board.settlement(grass).unwrap().size(), 0);
        assert_eq!(board.settlement_at(Location::new(0, -1, 0)).unwrap().id(), lake);
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn volcano_and_missing_cells_are_rejected() {
        let (mut board, mut player) = setup();
        assert_eq!(
            found(&mut board, &mut player, Location::new(0, 0, 0)),
            Err(SettlementError::HexIsVolcano(Location::new(0, 0, 0)))
        );
        assert_eq!(
            found(&mut board, &mut player, Location::new(5, 5, 0)),
            Err(SettlementError::NoHexAtLocation(Location::new(5, 5, 0)))
        );
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn covered_cell_is_rejected() {
        let (mut board, mut player) = setup();
        put(
            &mut board,
            Terrain::Jungle,
            Terrain::Lake,
            Location::new(-1, 0, 0),
            Orientation::NorthwestWest,
        );
        put(
            &mut board,
            Terrain::Rocky,
            Terrain::Rocky,
            Location::new(0, 0, 1),
            Orientation::NorthwestWest,
        );
        assert_eq!(
            found(&mut board, &mut player, Location::new(0, 1, 0)),
            Err(SettlementError::HexIsCovered(Location::new(0, 1, 0)))
        );
        assert!(found(&mut board, &mut player, Location::new(0, 1, 1)).is_ok());
    }

    #[test]
    fn no_settlers_left() {
        let mut board = Board::with_first_tile();
        let mut player = Player::new(Inventory {
            settlers: 0,
            ..Inventory::default()
        });
        assert_eq!(
            found(&mut board, &mut player, Location::new(0, 1, 0)),
            Err(SettlementError::Pieces(PieceError::NotEnoughPieces {
                kind: PieceKind::Settler,
                needed: 1,
                available: 0
            }))
        );
        assert!(board.settlements().is_empty());
    }

    #[test]
    fn shaman_is_anchored_once() {
        let (mut board, mut player) = setup();
        let at = Location::new(0, 1, 0);
        let id = found_with_shaman(&mut board, &mut player, at).unwrap();
        let settlement = board.settlement(id).unwrap();
        assert_eq!(settlement.shaman(), Some(at));
        assert_eq!(player.remaining(PieceKind::Shaman), 0);
        assert_eq!(player.remaining(PieceKind::Settler), 19);
        assert_eq!(player.score(), 1);

        assert_eq!(
            found_with_shaman(&mut board, &mut player, Location::new(-1, -1, 0)),
            Err(SettlementError::Pieces(PieceError::OutOfShamans))
        );
    }

    #[test]
    fn shaman_stays_at_sea_level() {
        let (mut board, mut player) = setup();
        assert_eq!(
            found_with_shaman(&mut board, &mut player, Location::new(0, 1, 1)),
            Err(SettlementError::ShamanOnUpperLevel(Location::new(0, 1, 1)))
        );
        assert_eq!(player.remaining(PieceKind::Shaman), 1);
    }

    #[test]
    fn failed_shaman_founding_keeps_the_shaman() {
        let (mut board, mut player) = setup();
        assert_eq!(
            found_with_shaman(&mut board, &mut player, Location::new(0, 0, 0)),
            Err(SettlementError::HexIsVolcano(Location::new(0, 0, 0)))
        );
        assert_eq!(player.remaining(PieceKind::Shaman), 1);
        assert_eq!(player.remaining(PieceKind::Settler), 20);
    }

    #[test]
    fn shaman_joining_an_existing_settlement_marks_it() {
        let (mut board, mut player) = setup();
        let lake = found(&mut board, &mut player, Location::new(1, 1, 0)).unwrap();
        let joined = found_with_shaman(&mut board, &mut player, Location::new(0, 1, 0)).unwrap();
        assert_eq!(joined, lake);
        assert!(board.settlement(lake).unwrap().has_shaman());
    }
}
