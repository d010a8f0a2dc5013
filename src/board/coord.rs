//! Hex coordinate system: the 61 valid cells and the six movement directions
//!
//! Cells are addressed as `(col, row)` with rows 1..=9 from bottom to top.
//! The lower half of the hexagon starts every row at column 1, the upper
//! half ends every row at column 9:
//!
//! ```text
//! row 9:          I5 I6 I7 I8 I9
//! row 5:  E1 E2 E3 E4 E5 E6 E7 E8 E9
//! row 1:  A1 A2 A3 A4 A5
//! ```
//!
//! Labels are the row letter followed by the column number.

use std::fmt;

use super::NUM_CELLS;

/// First and last column of a row (inclusive). Rows outside 1..=9 are empty.
#[inline]
const fn row_span(row: i8) -> (i8, i8) {
    if row <= 5 {
        (1, row + 4)
    } else {
        (row - 4, 9)
    }
}

/// Index of the first cell of each row in the flat cell table
const ROW_START: [usize; 9] = [0, 5, 11, 18, 26, 35, 43, 50, 56];

/// All valid cells in row-then-column order
pub const CELLS: [Coord; NUM_CELLS] = build_cells();

const fn build_cells() -> [Coord; NUM_CELLS] {
    let mut cells = [Coord { col: 0, row: 0 }; NUM_CELLS];
    let mut idx = 0;
    let mut row = 1;
    while row <= 9 {
        let (lo, hi) = row_span(row);
        let mut col = lo;
        while col <= hi {
            cells[idx] = Coord { col, row };
            idx += 1;
            col += 1;
        }
        row += 1;
    }
    cells
}

/// A board address. Not every pair is a cell; check [`Coord::is_valid`]
/// before using one to index the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub col: i8,
    pub row: i8,
}

impl Coord {
    #[inline]
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// True if this pair is one of the 61 playable cells
    #[inline]
    pub fn is_valid(self) -> bool {
        if !(1..=9).contains(&self.row) {
            return false;
        }
        let (lo, hi) = row_span(self.row);
        self.col >= lo && self.col <= hi
    }

    /// Flat index into the cell table, `None` off the board
    #[inline]
    pub fn index(self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let (lo, _) = row_span(self.row);
        Some(ROW_START[(self.row - 1) as usize] + (self.col - lo) as usize)
    }

    /// Inverse of [`Coord::index`]
    #[inline]
    pub fn from_index(idx: usize) -> Self {
        CELLS[idx]
    }

    /// The coordinate one step away. No bounds check: the result may lie
    /// off the board.
    #[inline]
    pub fn offset(self, dir: Direction) -> Coord {
        let (dc, dr) = dir.vector();
        Coord::new(self.col + dc, self.row + dr)
    }

    /// The neighbouring cell in `dir`, or `None` past the edge
    #[inline]
    pub fn neighbor(self, dir: Direction) -> Option<Coord> {
        let next = self.offset(dir);
        next.is_valid().then_some(next)
    }

    /// Dot product with the direction vector
    #[inline]
    pub fn project(self, dir: Direction) -> i32 {
        let (dc, dr) = dir.vector();
        self.col as i32 * dc as i32 + self.row as i32 * dr as i32
    }

    /// Parse a cell label such as `E5` (letter case ignored)
    pub fn from_label(label: &str) -> Option<Coord> {
        let mut chars = label.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        if !('A'..='I').contains(&letter) {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let col: i8 = digits.parse().ok()?;
        let coord = Coord::new(col, (letter as u8 - b'A' + 1) as i8);
        coord.is_valid().then_some(coord)
    }

    /// Row letter plus column number, e.g. `E5`
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' as i16 + self.row as i16 - 1) as u8 as char;
        write!(f, "{}{}", letter, self.col)
    }
}

/// Row-major order: bottom row first, then left to right
impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

/// The six hex directions, counter-clockwise from east
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    E,
    NE,
    NW,
    W,
    SW,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::NE,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::SE,
    ];

    /// `(dcol, drow)` unit vector
    #[inline]
    pub const fn vector(self) -> (i8, i8) {
        match self {
            Direction::E => (1, 0),
            Direction::NE => (1, 1),
            Direction::NW => (0, 1),
            Direction::W => (-1, 0),
            Direction::SW => (-1, -1),
            Direction::SE => (0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::E => Direction::W,
            Direction::NE => Direction::SW,
            Direction::NW => Direction::SE,
            Direction::W => Direction::E,
            Direction::SW => Direction::NE,
            Direction::SE => Direction::NW,
        }
    }

    /// Same axis: equal or exact opposites
    #[inline]
    pub fn is_colinear(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }

    pub fn from_vector(dc: i8, dr: i8) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.vector() == (dc, dr))
    }

    /// Direction whose single step leads from `from` to `to`
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        Direction::from_vector(to.col - from.col, to.row - from.row)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::E => "E",
            Direction::NE => "NE",
            Direction::NW => "NW",
            Direction::W => "W",
            Direction::SW => "SW",
            Direction::SE => "SE",
        }
    }

    /// Case-insensitive lookup by compass name
    pub fn from_name(name: &str) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
