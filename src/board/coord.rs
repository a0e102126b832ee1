//! Hex geometry for the island.
//!
//! Columns use axial coordinates: the six neighbors of `(x, y)` are
//! `(x+1, y)`, `(x+1, y+1)`, `(x, y+1)`, `(x-1, y)`, `(x-1, y-1)` and
//! `(x, y-1)`. A `Location` adds a height on top of a column; every layer
//! of the island shares the same column grid.

/// Axial offsets of the six columns surrounding a column.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, 1), (0, 1), (-1, 0), (-1, -1), (0, -1)];

/// Largest absolute axial coordinate a column may take.
pub const COORD_LIMIT: i32 = 1 << 20;

/// Highest layer a cell may occupy.
pub const HEIGHT_LIMIT: u32 = 1 << 16;

/// A column of the island, independent of height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column {
    pub x: i32,
    pub y: i32,
}

impl Column {
    pub const fn new(x: i32, y: i32) -> Self {
        Column { x, y }
    }

    /// Returns the column shifted by an axial offset. Only defined for
    /// columns that are `in_bounds`.
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Column {
        Column::new(self.x + dx, self.y + dy)
    }

    /// Returns the six surrounding columns.
    pub fn neighbors(self) -> [Column; 6] {
        NEIGHBOR_OFFSETS.map(|d| self.offset(d))
    }

    /// Returns true if the two columns share an edge.
    pub fn is_adjacent(self, other: Column) -> bool {
        match (other.x.checked_sub(self.x), other.y.checked_sub(self.y)) {
            (Some(dx), Some(dy)) => NEIGHBOR_OFFSETS.contains(&(dx, dy)),
            _ => false,
        }
    }

    /// True if the column and all of its neighbors fit the coordinate range.
    pub const fn in_bounds(self) -> bool {
        self.x.unsigned_abs() < COORD_LIMIT as u32 && self.y.unsigned_abs() < COORD_LIMIT as u32
    }

    /// Places this column at the given height.
    pub const fn at(self, height: u32) -> Location {
        Location::new(self.x, self.y, height)
    }
}

/// A cell position: a column plus a height (0 is the sea-level layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub height: u32,
}

impl Location {
    pub const fn new(x: i32, y: i32, height: u32) -> Self {
        Location { x, y, height }
    }

    pub const fn column(self) -> Column {
        Column::new(self.x, self.y)
    }

    /// Returns true if both locations lie in the same column.
    pub const fn same_column(self, other: Location) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// True if the column is in bounds and a layer above still fits.
    pub const fn in_bounds(self) -> bool {
        self.column().in_bounds() && self.height < HEIGHT_LIMIT
    }

    /// Same column, one layer up.
    pub const fn above(self) -> Location {
        Location::new(self.x, self.y, self.height + 1)
    }

    /// Same column, one layer down. `None` at sea level.
    pub fn below(self) -> Option<Location> {
        self.height.checked_sub(1).map(|h| Location::new(self.x, self.y, h))
    }

    /// The level a piece counts for in tiered scoring (sea level is 1).
    pub const fn level(self) -> u32 {
        self.height + 1
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.height)
    }
}

/// Rotation of a tile around its volcano cell.
///
/// Each orientation names the two directions in which the left and right
/// terrain cells sit relative to the volcano. Variants are listed clockwise
/// starting from the top; this order is also the search order used when
/// resolving an orientation and the 1-based number used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    NortheastNorthwest,
    EastNortheast,
    SoutheastEast,
    SouthwestSoutheast,
    WestSouthwest,
    NorthwestWest,
}

/// All orientations in enumeration order.
pub const ALL_ORIENTATIONS: [Orientation; 6] = [
    Orientation::NortheastNorthwest,
    Orientation::EastNortheast,
    Orientation::SoutheastEast,
    Orientation::SouthwestSoutheast,
    Orientation::WestSouthwest,
    Orientation::NorthwestWest,
];

impl Orientation {
    /// Axial offsets of the (left, right) cells relative to the volcano.
    pub const fn offsets(self) -> ((i32, i32), (i32, i32)) {
        match self {
            Orientation::NortheastNorthwest => ((1, 1), (0, 1)),
            Orientation::EastNortheast => ((1, 0), (1, 1)),
            Orientation::SoutheastEast => ((0, -1), (1, 0)),
            Orientation::SouthwestSoutheast => ((-1, -1), (0, -1)),
            Orientation::WestSouthwest => ((-1, 0), (-1, -1)),
            Orientation::NorthwestWest => ((0, 1), (-1, 0)),
        }
    }

    /// Location of the left cell for a volcano at `volcano`.
    pub fn left_of(self, volcano: Location) -> Location {
        volcano.column().offset(self.offsets().0).at(volcano.height)
    }

    /// Location of the right cell for a volcano at `volcano`.
    pub fn right_of(self, volcano: Location) -> Location {
        volcano.column().offset(self.offsets().1).at(volcano.height)
    }

    /// The three cell locations of a tile: `[volcano, left, right]`.
    pub fn footprint(self, volcano: Location) -> [Location; 3] {
        [volcano, self.left_of(volcano), self.right_of(volcano)]
    }

    /// 1-based wire number.
    pub fn number(self) -> u8 {
        ALL_ORIENTATIONS
            .iter()
            .position(|&o| o == self)
            .map_or(0, |i| i as u8 + 1)
    }

    /// Parses a 1-based wire number.
    pub fn from_number(n: u8) -> Option<Orientation> {
        match n {
            1..=6 => Some(ALL_ORIENTATIONS[usize::from(n) - 1]),
            _ => None,
        }
    }
}

/// Distinct columns that touch a tile footprint without being part of it.
///
/// Each of the three cells contributes four outside neighbor slots (twelve
/// in total); slots shared by two cells collapse, leaving nine columns.
pub fn adjacent_columns(footprint: &[Location; 3]) -> Vec<Column> {
    let own = footprint.map(Location::column);
    let mut out: Vec<Column> = Vec::with_capacity(12);
    for loc in footprint {
        for col in loc.column().neighbors() {
            if !own.contains(&col) && !out.contains(&col) {
                out.push(col);
            }
        }
    }
    out
}
