use std::{fmt, ops};

use ndarray::{Array, Array2};

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::piece::{Piece, piece_to_ascii};
use crate::side::Side;


// Number of rows each side fills at game start.
const STARTING_ROWS_PER_SIDE: u8 = 3;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GridItem<T> {
    Piece(T),
    Empty,
    OutOfBounds,
}

impl<T> GridItem<T> {
    pub fn is_free(&self) -> bool { matches!(self, GridItem::Empty) }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    data: Array2<Option<Piece>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    // Men on every dark square of the three back rows of each side; the middle two rows empty.
    pub fn starting_position() -> Self {
        let mut grid = Grid::new();
        for coord in Coord::all().filter(|coord| coord.is_dark()) {
            let row = coord.row.to_zero_based();
            if row < STARTING_ROWS_PER_SIDE {
                grid[coord] = Some(Piece::man(Side::Remote));
            } else if row >= NUM_ROWS - STARTING_ROWS_PER_SIDE {
                grid[coord] = Some(Piece::man(Side::Local));
            }
        }
        grid
    }

    pub fn get(&self, pos: Coord) -> GridItem<&Piece> {
        match self.data.get(coord_to_index(pos)) {
            None => GridItem::OutOfBounds,
            Some(None) => GridItem::Empty,
            Some(Some(v)) => GridItem::Piece(v),
        }
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |coord| match self[coord] {
            Some(piece) if piece.side == side => Some((coord, piece)),
            _ => None,
        })
    }

    // The board as the other peer stores it: rotated by 180 degrees with sides swapped.
    pub fn mirrored(&self) -> Self {
        let mut grid = Grid::new();
        for coord in Coord::all() {
            grid[coord.mirrored()] =
                self[coord].map(|piece| Piece { side: piece.side.mirrored(), ..piece });
        }
        grid
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<Piece>;
    fn index(&self, pos: Coord) -> &Self::Output {
        // Cannot fail: `Coord` is always within an 8x8 board.
        &self.data[coord_to_index(pos)]
    }
}

impl ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[coord_to_index(pos)]
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [
        pos.row.to_zero_based() as usize,
        pos.col.to_zero_based() as usize,
    ]
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid")?;
        for row in Row::all() {
            for col in Col::all() {
                let ch = self[Coord::new(row, col)].map_or('.', piece_to_ascii);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
