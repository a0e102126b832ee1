//! Structural consistency checks for a board.
//!
//! A board built through `crate::placement` and `crate::settlement` never
//! reports a violation; tests run these after every mutation.

use std::collections::{HashMap, HashSet};

use super::coord::Column;
use super::state::Board;
use super::terrain::Terrain;
use super::tile::CellId;

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Checks every board invariant and returns the violations found.
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();
    let mut highest: HashMap<Column, (u32, CellId)> = HashMap::new();

    for (i, cell) in board.cells().iter().enumerate() {
        let id = CellId(i as u32);
        let loc = cell.location;

        if !seen.insert(loc) {
            violations.push(violation(format!("two cells at {loc}")));
        }

        if let Some(below) = loc.below() {
            match board.lookup(below) {
                None => violations.push(violation(format!("cell at {loc} floats over air"))),
                Some(under) => {
                    if cell.terrain == Terrain::Volcano && under.terrain != Terrain::Volcano {
                        violations.push(violation(format!(
                            "volcano at {loc} sits on {:?}",
                            under.terrain
                        )));
                    }
                }
            }
        }

        if let Some(sid) = cell.settlement {
            let listed = board
                .settlement(sid)
                .is_some_and(|s| s.cells().contains(&id));
            if !listed {
                violations.push(violation(format!(
                    "cell at {loc} points at settlement {} which does not list it",
                    sid.0
                )));
            }
        }

        let entry = highest.entry(loc.column()).or_insert((loc.height, id));
        if loc.height > entry.0 {
            *entry = (loc.height, id);
        }
    }

    for settlement in board.settlements() {
        for &cell in settlement.cells() {
            if board.cell(cell).settlement != Some(settlement.id()) {
                violations.push(violation(format!(
                    "settlement {} lists a cell owned elsewhere",
                    settlement.id().0
                )));
            }
        }
    }

    for (col, (_, id)) in highest {
        if board.topmost_id(col) != Some(id) {
            violations.push(violation(format!(
                "topmost index for ({},{}) is stale",
                col.x, col.y
            )));
        }
    }

    violations
}
