use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


// Row 0 is the top of the board as seen by the local player, i.e. the remote player's back row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub const fn try_from_zero_based(idx: i8) -> Option<Self> {
        if idx >= 0 && idx < NUM_ROWS as i8 {
            Some(Self { idx: idx as u8 })
        } else {
            None
        }
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn mirrored(self) -> Self { Self { idx: NUM_ROWS - self.idx - 1 } }
    pub fn checked_add(self, delta: i8) -> Option<Self> {
        Self::try_from_zero_based(self.idx as i8 + delta)
    }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub const fn try_from_zero_based(idx: i8) -> Option<Self> {
        if idx >= 0 && idx < NUM_COLS as i8 {
            Some(Self { idx: idx as u8 })
        } else {
            None
        }
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn mirrored(self) -> Self { Self { idx: NUM_COLS - self.idx - 1 } }
    pub fn checked_add(self, delta: i8) -> Option<Self> {
        Self::try_from_zero_based(self.idx as i8 + delta)
    }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}


// On the wire a coord is a `[row, col]` pair. Deserialization rejects out-of-bounds values
// instead of panicking, since the other peer is not trusted to send valid data.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "(u8, u8)", try_from = "(u8, u8)")]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    pub const fn from_zero_based(row: u8, col: u8) -> Self {
        Self::new(Row::from_zero_based(row), Col::from_zero_based(col))
    }
    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    // Pieces only ever stand on dark squares.
    pub fn is_dark(self) -> bool { (self.row.to_zero_based() + self.col.to_zero_based()) % 2 == 1 }

    pub fn offset(self, (d_row, d_col): (i8, i8)) -> Option<Coord> {
        Some(Coord {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }

    // Converts between the two peers' points of view: each peer keeps its own pieces at the
    // bottom, so the other peer sees the board rotated by 180 degrees.
    pub fn mirrored(self) -> Coord {
        Coord {
            row: self.row.mirrored(),
            col: self.col.mirrored(),
        }
    }
}

impl From<Coord> for (u8, u8) {
    fn from(coord: Coord) -> Self { (coord.row.to_zero_based(), coord.col.to_zero_based()) }
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = String;
    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        if row < NUM_ROWS && col < NUM_COLS {
            Ok(Coord::from_zero_based(row, col))
        } else {
            Err(format!("Coord ({row}, {col}) is out of bound for {NUM_ROWS}x{NUM_COLS} board"))
        }
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.row.to_zero_based(), self.col.to_zero_based())
    }
}
