// Test utilities shared by unit tests and the integration tests in the "tests" folder.

use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::grid::Grid;
use crate::piece::piece_from_ascii;


// Random tests verify properties that should always hold, but let's fix the seed to avoid
// sporadic failures.
pub fn deterministic_rng() -> StdRng { StdRng::from_seed([0; 32]) }

// Parses a board drawn as 8 lines of 8 whitespace-separated cells, top line being row 0.
// See `piece_from_ascii` for piece notation; '.' is an empty square.
pub fn try_parse_grid(board_str: &str) -> Result<Grid, String> {
    let rows = board_str
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.split_ascii_whitespace().collect_vec())
        .collect_vec();
    if rows.len() != NUM_ROWS as usize {
        return Err(format!("Expected {NUM_ROWS} rows, got {}", rows.len()));
    }
    let mut grid = Grid::new();
    for (row, cells) in Row::all().zip(rows) {
        if cells.len() != NUM_COLS as usize {
            return Err(format!("Expected {NUM_COLS} cells in row {:?}", row));
        }
        for (col, cell) in Col::all().zip(cells) {
            let coord = Coord::new(row, col);
            grid[coord] = match cell {
                "." => None,
                _ => {
                    let piece = cell
                        .chars()
                        .exactly_one()
                        .ok()
                        .and_then(piece_from_ascii)
                        .ok_or_else(|| format!("Invalid piece: {cell}"))?;
                    if !coord.is_dark() {
                        return Err(format!("Piece on a light square: {coord:?}"));
                    }
                    Some(piece)
                }
            };
        }
    }
    Ok(grid)
}

pub fn parse_grid(board_str: &str) -> Grid {
    try_parse_grid(board_str).unwrap_or_else(|err| panic!("{err}"))
}
