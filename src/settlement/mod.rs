//! Settlement engine.
//!
//! Settlements are connected groups of claimed cells. They are created by
//! founding, grow through merges and expansion, host at most one of each
//! structure kind and optionally a shaman. A settlement is never deleted:
//! once every member cell is buried it simply stops being reachable.

pub mod expand;
pub mod flood;
pub mod found;
pub mod structure;

pub use expand::{expand, ExpansionOutcome};
pub use found::{found, found_with_shaman};
pub use structure::build;

use crate::board::{CellId, Location, Terrain};
use crate::player::PieceError;

/// Index of a settlement in the board's settlement arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettlementId(pub u32);

impl std::fmt::Display for SettlementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Special structures; each settlement hosts at most one of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Sanctuary,
    Playground,
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureKind::Sanctuary => f.write_str("sanctuary"),
            StructureKind::Playground => f.write_str("playground"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("no cell at {0}")]
    NoHexAtLocation(Location),
    #[error("cannot settle the volcano at {0}")]
    HexIsVolcano(Location),
    #[error("a settlement already occupies {0}")]
    SettlementAlreadyExists(Location),
    #[error("cell at {0} is covered")]
    HexIsCovered(Location),
    #[error("no settlement {0}")]
    UnknownSettlement(SettlementId),
    #[error("no cells to expand into")]
    NoHexesToExpandTo,
    #[error("build conditions not met: {0}")]
    BuildConditionsNotMet(&'static str),
    #[error("the shaman must stand at sea level, not {0}")]
    ShamanOnUpperLevel(Location),
    #[error(transparent)]
    Pieces(#[from] PieceError),
}

/// State moved out of a settlement when it is merged into another.
pub(crate) struct Absorbed {
    pub(crate) cells: Vec<CellId>,
    shaman: Option<Location>,
    structures: Vec<(StructureKind, Location)>,
}

/// A settlement record. Membership changes go through the board so that
/// cell back-references stay in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    id: SettlementId,
    terrain: Terrain,
    cells: Vec<CellId>,
    pub(crate) shaman: Option<Location>,
    pub(crate) structures: Vec<(StructureKind, Location)>,
}

impl Settlement {
    pub(crate) fn new(id: SettlementId, terrain: Terrain) -> Self {
        Settlement {
            id,
            terrain,
            cells: Vec::new(),
            shaman: None,
            structures: Vec::new(),
        }
    }

    pub(crate) fn push_cell(&mut self, cell: CellId) {
        self.cells.push(cell);
    }

    pub(crate) fn drain(&mut self) -> Absorbed {
        Absorbed {
            cells: std::mem::take(&mut self.cells),
            shaman: self.shaman.take(),
            structures: std::mem::take(&mut self.structures),
        }
    }

    /// Takes over drained state. An existing shaman wins over the incoming one.
    pub(crate) fn absorb(&mut self, absorbed: Absorbed) {
        self.cells.extend(absorbed.cells);
        if self.shaman.is_none() {
            self.shaman = absorbed.shaman;
        }
        self.structures.extend(absorbed.structures);
    }

    pub fn id(&self) -> SettlementId {
        self.id
    }

    /// Terrain of the founding cell.
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Member cells, buried ones included.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn has_shaman(&self) -> bool {
        self.shaman.is_some()
    }

    /// Anchor of the active shaman.
    pub fn shaman(&self) -> Option<Location> {
        self.shaman
    }

    pub fn has_structure(&self, kind: StructureKind) -> bool {
        self.structures.iter().any(|&(k, _)| k == kind)
    }

    /// Anchor locations of every structure of `kind`.
    pub fn anchors(&self, kind: StructureKind) -> impl Iterator<Item = Location> + '_ {
        self.structures
            .iter()
            .filter(move |&&(k, _)| k == kind)
            .map(|&(_, at)| at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_keeps_existing_shaman() {
        let mut a = Settlement::new(SettlementId(0), Terrain::Lake);
        let mut b = Settlement::new(SettlementId(1), Terrain::Lake);
        a.push_cell(CellId(1));
        a.shaman = Some(Location::new(0, 0, 0));
        b.push_cell(CellId(2));
        b.shaman = Some(Location::new(5, 5, 0));
        b.structures.push((StructureKind::Playground, Location::new(5, 6, 0)));

        a.absorb(b.drain());
        assert_eq!(a.cells(), &[CellId(1), CellId(2)]);
        assert_eq!(a.shaman(), Some(Location::new(0, 0, 0)));
        assert!(a.has_structure(StructureKind::Playground));
        assert!(!a.has_structure(StructureKind::Sanctuary));
        assert_eq!(b.size(), 0);
        assert!(!b.has_shaman());
    }

    #[test]
    fn piece_errors_pass_through_unchanged() {
        let err = SettlementError::from(PieceError::OutOfShamans);
        assert_eq!(err.to_string(), PieceError::OutOfShamans.to_string());
    }
}
