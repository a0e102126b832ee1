//! Terrain kinds.

/// The terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terrain {
    Volcano,
    Jungle,
    Grassland,
    Lake,
    Rocky,
    Paddy,
}

/// All terrains in index order.
pub const ALL_TERRAINS: [Terrain; 6] = [
    Terrain::Volcano,
    Terrain::Jungle,
    Terrain::Grassland,
    Terrain::Lake,
    Terrain::Rocky,
    Terrain::Paddy,
];

impl Terrain {
    /// Returns true for every terrain that can hold settlers or structures.
    pub const fn is_habitable(self) -> bool {
        !matches!(self, Terrain::Volcano)
    }

    /// Returns the uppercase token used by the game server.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Terrain::Volcano => "VOLCANO",
            Terrain::Jungle => "JUNGLE",
            Terrain::Grassland => "GRASS",
            Terrain::Lake => "LAKE",
            Terrain::Rocky => "ROCK",
            Terrain::Paddy => "PADDY",
        }
    }

    /// Parses a server token (case-sensitive).
    pub fn from_wire_name(s: &str) -> Option<Terrain> {
        ALL_TERRAINS.iter().copied().find(|t| t.wire_name() == s)
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
