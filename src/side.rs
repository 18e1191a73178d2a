use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::{NUM_ROWS, Row};


// Sides are relative to the peer that holds the board: each peer is `Local` on its own copy
// and sees the other peer as `Remote`. Local pieces start at the bottom (rows 5..7).
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize,
    Deserialize,
)]
pub enum Side {
    Local,
    Remote,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Local => Side::Remote,
            Side::Remote => Side::Local,
        }
    }

    // The same side as seen from the other peer's board.
    pub fn mirrored(self) -> Side { self.opponent() }

    // Row delta of a man's step.
    pub fn forward(self) -> i8 {
        match self {
            Side::Local => -1,
            Side::Remote => 1,
        }
    }

    // The farthest row from the side's own starting rows.
    pub fn promotion_row(self) -> Row {
        match self {
            Side::Local => Row::from_zero_based(0),
            Side::Remote => Row::from_zero_based(NUM_ROWS - 1),
        }
    }
}
