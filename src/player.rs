//! Piece inventory and score of the acting player.

use serde::{Deserialize, Serialize};

/// Kinds of pieces a player holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Settler,
    Sanctuary,
    Playground,
    Shaman,
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Settler => "settler",
            PieceKind::Sanctuary => "sanctuary",
            PieceKind::Playground => "playground",
            PieceKind::Shaman => "shaman",
        };
        f.write_str(name)
    }
}

/// Remaining pieces per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Inventory {
    pub settlers: u32,
    pub sanctuaries: u32,
    pub playgrounds: u32,
    pub shamans: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Inventory {
            settlers: 20,
            sanctuaries: 3,
            playgrounds: 2,
            shamans: 1,
        }
    }
}

impl Inventory {
    pub fn get(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Settler => self.settlers,
            PieceKind::Sanctuary => self.sanctuaries,
            PieceKind::Playground => self.playgrounds,
            PieceKind::Shaman => self.shamans,
        }
    }

    fn slot(&mut self, kind: PieceKind) -> &mut u32 {
        match kind {
            PieceKind::Settler => &mut self.settlers,
            PieceKind::Sanctuary => &mut self.sanctuaries,
            PieceKind::Playground => &mut self.playgrounds,
            PieceKind::Shaman => &mut self.shamans,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PieceError {
    #[error("not enough {kind} pieces: need {needed}, have {available}")]
    NotEnoughPieces {
        kind: PieceKind,
        needed: u32,
        available: u32,
    },
    #[error("the shaman has already been placed")]
    OutOfShamans,
}

/// A player's finite pieces and accumulated score.
///
/// Pieces are only ever removed; nothing returns to the inventory, not even
/// a shaman whose anchor is later buried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pieces: Inventory,
    score: u32,
}

impl Default for Player {
    fn default() -> Self {
        Player::new(Inventory::default())
    }
}

impl Player {
    pub fn new(pieces: Inventory) -> Self {
        Player { pieces, score: 0 }
    }

    pub fn remaining(&self, kind: PieceKind) -> u32 {
        self.pieces.get(kind)
    }

    pub fn pieces(&self) -> Inventory {
        self.pieces
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Fails unless at least `needed` pieces of `kind` remain.
    pub fn ensure(&self, kind: PieceKind, needed: u32) -> Result<(), PieceError> {
        let available = self.pieces.get(kind);
        if available >= needed {
            return Ok(());
        }
        match kind {
            PieceKind::Shaman => Err(PieceError::OutOfShamans),
            _ => Err(PieceError::NotEnoughPieces {
                kind,
                needed,
                available,
            }),
        }
    }

    /// Removes `count` pieces of `kind`, or nothing if too few remain.
    pub fn spend(&mut self, kind: PieceKind, count: u32) -> Result<(), PieceError> {
        self.ensure(kind, count)?;
        *self.pieces.slot(kind) -= count;
        Ok(())
    }

    pub fn award(&mut self, points: u32) {
        self.score += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_inventory() {
        let player = Player::default();
        assert_eq!(player.score(), 0);
        assert_eq!(player.remaining(PieceKind::Settler), 20);
        assert_eq!(player.remaining(PieceKind::Sanctuary), 3);
        assert_eq!(player.remaining(PieceKind::Playground), 2);
        assert_eq!(player.remaining(PieceKind::Shaman), 1);
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut player = Player::new(Inventory {
            settlers: 3,
            ..Inventory::default()
        });
        assert_eq!(
            player.spend(PieceKind::Settler, 4),
            Err(PieceError::NotEnoughPieces {
                kind: PieceKind::Settler,
                needed: 4,
                available: 3
            })
        );
        assert_eq!(player.remaining(PieceKind::Settler), 3);
        player.spend(PieceKind::Settler, 3).unwrap();
        assert_eq!(player.remaining(PieceKind::Settler), 0);
    }

    #[test]
    fn second_shaman_is_refused() {
        let mut player = Player::default();
        player.spend(PieceKind::Shaman, 1).unwrap();
        assert_eq!(player.spend(PieceKind::Shaman, 1), Err(PieceError::OutOfShamans));
    }

    #[test]
    fn award_accumulates() {
        let mut player = Player::default();
        player.award(1);
        player.award(14);
        assert_eq!(player.score(), 15);
    }

    #[test]
    fn spending_the_last_settler_empties_the_supply() {
        let mut player = Player::new(Inventory {
            settlers: 1,
            sanctuaries: 0,
            playgrounds: 0,
            shamans: 0,
        });
        assert_eq!(player.remaining(PieceKind::Settler), 1);
        player.spend(PieceKind::Settler, 1).unwrap();
        assert_eq!(player.remaining(PieceKind::Settler), 0);
        assert_eq!(
            player.ensure(PieceKind::Settler, 1),
            Err(PieceError::NotEnoughPieces {
                kind: PieceKind::Settler,
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn inventory_deserializes_with_defaults() {
        let inv: Inventory = serde_json::from_str(r#"{"settlers": 5}"#).unwrap();
        assert_eq!(inv.settlers, 5);
        assert_eq!(inv.shamans, 1);
    }
}
