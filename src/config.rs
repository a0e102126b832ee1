//! Game-balance rules.
//!
//! Everything the engine treats as a tunable constant lives here: starting
//! pieces, structure eligibility and the expansion cost model. Rules load
//! from JSON; every field is optional and falls back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::player::{Inventory, PieceKind};
use crate::settlement::StructureKind;

/// How expansion is paid for and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionScoring {
    /// One settler and one point per claimed cell.
    #[default]
    Flat,
    /// A cell at level `n` (sea level is 1) costs `n` settlers and scores `n * n`.
    Tiered,
}

impl ExpansionScoring {
    pub fn cost(self, level: u32) -> u32 {
        match self {
            ExpansionScoring::Flat => 1,
            ExpansionScoring::Tiered => level,
        }
    }

    pub fn points(self, level: u32) -> u32 {
        match self {
            ExpansionScoring::Flat => 1,
            ExpansionScoring::Tiered => level * level,
        }
    }
}

/// Eligibility and cost of one structure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructureRule {
    pub piece: PieceKind,
    /// Minimum number of live cells in the hosting settlement.
    pub min_settlement_size: usize,
    /// Minimum height of the target cell.
    #[serde(default)]
    pub min_height: u32,
}

fn default_sanctuary() -> StructureRule {
    StructureRule {
        piece: PieceKind::Sanctuary,
        min_settlement_size: 5,
        min_height: 0,
    }
}

fn default_playground() -> StructureRule {
    StructureRule {
        piece: PieceKind::Playground,
        min_settlement_size: 1,
        min_height: 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rules {
    #[serde(default)]
    pub starting_pieces: Inventory,
    #[serde(default = "default_sanctuary")]
    pub sanctuary: StructureRule,
    #[serde(default = "default_playground")]
    pub playground: StructureRule,
    #[serde(default)]
    pub expansion: ExpansionScoring,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            starting_pieces: Inventory::default(),
            sanctuary: default_sanctuary(),
            playground: default_playground(),
            expansion: ExpansionScoring::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rules: {0}")]
    Invalid(String),
}

impl Rules {
    /// Tournament rules: tiered expansion and playgrounds only on level 3.
    pub fn tournament() -> Self {
        Rules {
            playground: StructureRule {
                min_height: 2,
                ..default_playground()
            },
            expansion: ExpansionScoring::Tiered,
            ..Rules::default()
        }
    }

    /// Looks up the rule for a structure kind.
    pub fn structure(&self, kind: StructureKind) -> &StructureRule {
        match kind {
            StructureKind::Sanctuary => &self.sanctuary,
            StructureKind::Playground => &self.playground,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let rules: Rules = serde_json::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in [StructureKind::Sanctuary, StructureKind::Playground] {
            let rule = self.structure(kind);
            if matches!(rule.piece, PieceKind::Settler | PieceKind::Shaman) {
                return Err(ConfigError::Invalid(format!(
                    "{kind} cannot be paid with a {} piece",
                    rule.piece
                )));
            }
            if rule.min_settlement_size == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{kind} needs a minimum settlement size of at least 1"
                )));
            }
        }
        Ok(())
    }
}
