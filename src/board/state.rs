//! The island board.
//!
//! An append-only store of cells in three arenas (cells, tiles and
//! settlements) plus two indexes: exact location and topmost cell per
//! column. The board never checks legality itself; callers go through
//! `crate::placement` before inserting.

use std::collections::HashMap;

use super::coord::{Column, Location};
use super::terrain::Terrain;
use super::tile::{Cell, CellId, PlacedTile, Tile, TileId, FIRST_TILE_LAYOUT};
use crate::placement::PlacementError;
use crate::settlement::{Settlement, SettlementId, StructureKind};

/// Complete island state.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: Vec<Cell>,
    tiles: Vec<PlacedTile>,
    settlements: Vec<Settlement>,
    by_location: HashMap<Location, CellId>,
    topmost: HashMap<Column, CellId>,
    first_tile_placed: bool,
}

impl Board {
    /// Creates an empty board without the starting formation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board with the starting formation already in place.
    pub fn with_first_tile() -> Self {
        let mut board = Self::new();
        board.install_first_tile();
        board
    }

    /// Installs the fixed five-cell starting formation.
    ///
    /// Fails with `FirstTileAlreadyPlaced` on every call after the first.
    pub fn place_first_tile(&mut self) -> Result<TileId, PlacementError> {
        if self.first_tile_placed {
            return Err(PlacementError::FirstTileAlreadyPlaced);
        }
        Ok(self.install_first_tile())
    }

    fn install_first_tile(&mut self) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        let cells = FIRST_TILE_LAYOUT
            .iter()
            .map(|&(loc, terrain)| self.push_cell(id, loc, terrain))
            .collect();
        self.tiles.push(PlacedTile { id, cells });
        self.first_tile_placed = true;
        tracing::debug!(tile = id.0, "starting formation installed");
        id
    }

    /// Returns true once the starting formation is on the board.
    pub fn has_first_tile(&self) -> bool {
        self.first_tile_placed
    }

    /// Adds a tile at the given `[volcano, left, right]` locations.
    ///
    /// Unconditional: the caller must have validated the placement.
    pub fn insert(&mut self, tile: Tile, locations: [Location; 3]) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        let cells = locations
            .iter()
            .zip(tile.terrains())
            .map(|(&loc, terrain)| self.push_cell(id, loc, terrain))
            .collect();
        self.tiles.push(PlacedTile { id, cells });
        id
    }

    fn push_cell(&mut self, tile: TileId, location: Location, terrain: Terrain) -> CellId {
        let id = CellId(self.cells.len() as u32);
        self.cells.push(Cell {
            location,
            terrain,
            tile,
            settlement: None,
        });
        self.by_location.insert(location, id);

        let col = location.column();
        let higher = match self.topmost.get(&col) {
            Some(&top) => self.cell(top).location.height < location.height,
            None => true,
        };
        if higher {
            self.topmost.insert(col, id);
        }
        id
    }

    /// Exact-height lookup.
    pub fn lookup(&self, location: Location) -> Option<&Cell> {
        self.cell_id_at(location).map(|id| self.cell(id))
    }

    /// Arena id of the cell at an exact location.
    pub fn cell_id_at(&self, location: Location) -> Option<CellId> {
        self.by_location.get(&location).copied()
    }

    /// Returns the cell for an id handed out by this board.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0 as usize]
    }

    /// The highest cell in a column, regardless of height.
    pub fn topmost(&self, column: Column) -> Option<&Cell> {
        self.topmost_id(column).map(|id| self.cell(id))
    }

    pub fn topmost_id(&self, column: Column) -> Option<CellId> {
        self.topmost.get(&column).copied()
    }

    /// Height of the highest cell in a column.
    pub fn top_height(&self, column: Column) -> Option<u32> {
        self.topmost(column).map(|c| c.location.height)
    }

    /// Returns true if no cell has been stacked on top of this one.
    pub fn is_topmost(&self, id: CellId) -> bool {
        self.topmost_id(self.cell(id).location.column()) == Some(id)
    }

    /// Topmost cells of the six columns around `column`.
    pub fn topmost_neighbors(&self, column: Column) -> impl Iterator<Item = CellId> + '_ {
        column
            .neighbors()
            .into_iter()
            .filter_map(move |c| self.topmost_id(c))
    }

    /// Every cell ever placed, buried ones included, in insertion order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every column holding at least one cell.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.topmost.keys().copied()
    }

    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&PlacedTile> {
        self.tiles.get(id.0 as usize)
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn settlement(&self, id: SettlementId) -> Option<&Settlement> {
        self.settlements.get(id.0 as usize)
    }

    /// The settlement the cell at `location` belongs to, if any.
    pub fn settlement_at(&self, location: Location) -> Option<&Settlement> {
        self.lookup(location)
            .and_then(|c| c.settlement)
            .and_then(|id| self.settlement(id))
    }

    /// Number of a settlement's cells that are still topmost.
    pub fn live_size(&self, id: SettlementId) -> usize {
        self.settlement(id).map_or(0, |s| {
            s.cells().iter().filter(|&&c| self.is_topmost(c)).count()
        })
    }

    pub(crate) fn create_settlement(&mut self, terrain: Terrain) -> SettlementId {
        let id = SettlementId(self.settlements.len() as u32);
        self.settlements.push(Settlement::new(id, terrain));
        id
    }

    /// Attaches an unowned cell to a settlement.
    pub(crate) fn claim(&mut self, cell: CellId, id: SettlementId) {
        let slot = &mut self.cells[cell.0 as usize].settlement;
        debug_assert!(slot.is_none(), "cell {cell:?} already owned");
        *slot = Some(id);
        self.settlements[id.0 as usize].push_cell(cell);
    }

    /// Moves every cell, the shaman and all structure anchors of `from` into `into`.
    pub(crate) fn merge_settlements(&mut self, into: SettlementId, from: SettlementId) {
        if into == from {
            return;
        }
        let absorbed = self.settlements[from.0 as usize].drain();
        for &cell in &absorbed.cells {
            self.cells[cell.0 as usize].settlement = Some(into);
        }
        self.settlements[into.0 as usize].absorb(absorbed);
        tracing::info!(into = into.0, from = from.0, "settlements merged");
    }

    pub(crate) fn set_shaman(&mut self, id: SettlementId, at: Location) {
        self.settlements[id.0 as usize].shaman = Some(at);
    }

    pub(crate) fn clear_shaman(&mut self, id: SettlementId) {
        self.settlements[id.0 as usize].shaman = None;
    }

    pub(crate) fn add_structure(&mut self, id: SettlementId, kind: StructureKind, at: Location) {
        self.settlements[id.0 as usize].structures.push((kind, at));
    }
}
