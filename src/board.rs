// Board engine: the rule authority for a single peer's copy of the board.
//
// All moves are validated before they touch the grid, so neither a buggy caller nor a
// misbehaving remote peer can put the board into an inconsistent state.

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::coord::Coord;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub src: Coord,
    pub dest: Coord,
    // Set iff the move captures a piece.
    pub jumped: Option<Coord>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    // The same piece must capture again before the turn can end.
    pub continues: bool,
    pub promoted: bool,
    pub captured: Option<Piece>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnError {
    EmptySquare,
    NotOwnPiece,
    NoLegalMoves,
    IllegalMove,
    WrongTurnOrder,
    MustContinueJumping,
    TurnAlreadyMade,
    NoMoveMade,
    GameOver,
}

impl Move {
    pub fn simple(src: Coord, dest: Coord) -> Self { Move { src, dest, jumped: None } }
    pub fn capture(src: Coord, jumped: Coord, dest: Coord) -> Self {
        Move { src, dest, jumped: Some(jumped) }
    }

    pub fn is_capture(&self) -> bool { self.jumped.is_some() }

    pub fn mirrored(self) -> Self {
        Move {
            src: self.src.mirrored(),
            dest: self.dest.mirrored(),
            jumped: self.jumped.map(Coord::mirrored),
        }
    }
}

// Mandatory capture: when any capture is available, simple steps are not legal.
fn keep_captures_if_any(moves: Vec<Move>) -> Vec<Move> {
    if moves.iter().any(Move::is_capture) {
        moves.into_iter().filter(Move::is_capture).collect_vec()
    } else {
        moves
    }
}

// All steps and jumps of a piece, ignoring captures available elsewhere on the board.
fn piece_moves(grid: &Grid, from: Coord, piece: Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    for direction in piece.directions() {
        let Some(step) = from.offset(direction) else {
            continue;
        };
        match grid[step] {
            None => moves.push(Move::simple(from, step)),
            Some(other) if other.side != piece.side => {
                if let Some(landing) = step.offset(direction) {
                    if grid[landing].is_none() {
                        moves.push(Move::capture(from, step, landing));
                    }
                }
            }
            Some(_) => {}
        }
    }
    moves
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: Grid,
}

impl Board {
    pub fn new() -> Self { Self::new_from_grid(Grid::starting_position()) }
    pub fn new_from_grid(grid: Grid) -> Self { Board { grid } }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn occupant(&self, coord: Coord) -> Option<Piece> { self.grid[coord] }

    pub fn piece_counts(&self) -> EnumMap<Side, usize> {
        let mut counts = enum_map! { _ => 0 };
        for coord in Coord::all() {
            if let Some(piece) = self.grid[coord] {
                counts[piece.side] += 1;
            }
        }
        counts
    }

    // Legal moves of the piece on `from`, which must belong to `side`. If the piece can
    // capture, only captures are returned.
    pub fn legal_moves(&self, side: Side, from: Coord) -> Result<Vec<Move>, TurnError> {
        let piece = self.grid[from].ok_or(TurnError::EmptySquare)?;
        if piece.side != side {
            return Err(TurnError::NotOwnPiece);
        }
        Ok(keep_captures_if_any(piece_moves(&self.grid, from, piece)))
    }

    // Legal moves of all pieces of `side`. Captures suppress simple steps across the whole board:
    // if one piece can capture, no piece of the side may make a simple step.
    pub fn all_legal_moves(&self, side: Side) -> Vec<Move> {
        let moves = self
            .grid
            .pieces(side)
            .flat_map(|(coord, piece)| piece_moves(&self.grid, coord, piece))
            .collect_vec();
        keep_captures_if_any(moves)
    }

    pub fn has_capture(&self, side: Side, from: Coord) -> bool {
        self.legal_moves(side, from)
            .is_ok_and(|moves| moves.iter().any(Move::is_capture))
    }

    pub fn apply_move(&mut self, side: Side, mv: Move) -> Result<MoveOutcome, TurnError> {
        // Turn application is split into two phases:
        //   - First, check that the move is legal (does not change the board, can fail).
        //   - Second, apply it (changes the board, cannot fail).
        self.legal_moves(side, mv.src)?;
        if !self.all_legal_moves(side).contains(&mv) {
            return Err(TurnError::IllegalMove);
        }

        let mut piece = self.grid[mv.src].take().ok_or(TurnError::EmptySquare)?;
        let captured = mv.jumped.and_then(|jumped| self.grid[jumped].take());
        let promoted = !piece.is_king() && mv.dest.row == side.promotion_row();
        if promoted {
            piece = piece.promoted();
        }
        self.grid[mv.dest] = Some(piece);

        // Promotion always ends the turn, even in the middle of a jump chain.
        let continues = captured.is_some() && !promoted && self.has_capture(side, mv.dest);
        Ok(MoveOutcome { continues, promoted, captured })
    }

    // Returns the winner, if any. A side with no pieces left loses immediately. Otherwise the side
    // that is about to move loses if none of its pieces can move.
    pub fn is_terminal(&self, to_move: Side) -> Option<Side> {
        let counts = self.piece_counts();
        if let Some(loser) = Side::iter().find(|&side| counts[side] == 0) {
            return Some(loser.opponent());
        }
        if self.all_legal_moves(to_move).is_empty() {
            return Some(to_move.opponent());
        }
        None
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_util::parse_grid;

    fn c(row: u8, col: u8) -> Coord { Coord::from_zero_based(row, col) }

    #[test]
    fn starting_moves() {
        let board = Board::new();
        assert_eq!(board.all_legal_moves(Side::Local).len(), 7);
        assert_eq!(board.all_legal_moves(Side::Remote).len(), 7);
        assert_eq!(
            board.legal_moves(Side::Local, c(5, 0)).unwrap(),
            vec![Move::simple(c(5, 0), c(4, 1))]
        );
        assert_eq!(board.legal_moves(Side::Local, c(6, 1)).unwrap(), vec![]);
    }

    #[test]
    fn move_mirror_is_involution() {
        let step = Move::simple(c(5, 0), c(4, 1));
        assert_eq!(step.mirrored(), Move::simple(c(2, 7), c(3, 6)));
        assert_eq!(step.mirrored().mirrored(), step);

        let jump = Move::capture(c(5, 2), c(4, 3), c(3, 4));
        assert_eq!(jump.mirrored(), Move::capture(c(2, 5), c(3, 4), c(4, 3)));
        assert_eq!(jump.mirrored().jumped, Some(c(4, 3).mirrored()));
        assert_eq!(jump.mirrored().mirrored(), jump);
    }

    #[test]
    fn query_contract_violations() {
        let board = Board::new();
        assert_eq!(board.legal_moves(Side::Local, c(4, 1)), Err(TurnError::EmptySquare));
        assert_eq!(board.legal_moves(Side::Local, c(2, 1)), Err(TurnError::NotOwnPiece));
        assert_eq!(board.legal_moves(Side::Remote, c(5, 0)), Err(TurnError::NotOwnPiece));
    }

    #[test]
    fn illegal_move_leaves_board_intact() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(
            board.apply_move(Side::Local, Move::simple(c(5, 0), c(3, 2))),
            Err(TurnError::IllegalMove)
        );
        assert_eq!(
            board.apply_move(Side::Local, Move::simple(c(6, 1), c(5, 2))),
            Err(TurnError::IllegalMove)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn jump_must_name_captured_square() {
        let mut board = Board::new_from_grid(parse_grid(
            "
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . x . . .
            . . . o . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
        ",
        ));
        assert_eq!(
            board.apply_move(Side::Local, Move::simple(c(4, 3), c(2, 5))),
            Err(TurnError::IllegalMove)
        );
        let outcome = board.apply_move(Side::Local, Move::capture(c(4, 3), c(3, 4), c(2, 5)));
        assert_eq!(
            outcome,
            Ok(MoveOutcome {
                continues: false,
                promoted: false,
                captured: Some(Piece::man(Side::Remote)),
            })
        );
        assert_eq!(board.occupant(c(3, 4)), None);
        assert_eq!(board.occupant(c(2, 5)), Some(Piece::man(Side::Local)));
    }
}
