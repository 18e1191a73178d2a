use itertools::Itertools;

use crate::board::{Board, Move, MoveOutcome, TurnError};
use crate::coord::Coord;
use crate::grid::Grid;
use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Active,
    Victory(Side),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TurnState {
    pub current_player: Side,
    // While a jump is forced this is the jumping piece and cannot be changed.
    pub selected: Option<Coord>,
    pub legal_moves_for_selection: Vec<Move>,
    // True only right after a capture when the same piece can capture again.
    pub must_continue_jumping: bool,
    // At least one step has been made this turn, so the turn may be ended.
    pub has_moved: bool,
}

impl TurnState {
    fn new(current_player: Side) -> Self {
        TurnState {
            current_player,
            selected: None,
            legal_moves_for_selection: Vec::new(),
            must_continue_jumping: false,
            has_moved: false,
        }
    }
}

// A checkers game as stored by one peer: the board plus whose turn it is. Both players' steps go
// through here, so the turn order is enforced for local input and remote messages alike.
#[derive(Clone, Debug)]
pub struct CheckersGame {
    board: Board,
    turn: TurnState,
    status: GameStatus,
}

impl CheckersGame {
    pub fn new(first_player: Side) -> Self {
        Self::new_with_grid(Grid::starting_position(), first_player)
    }

    pub fn new_with_grid(grid: Grid, first_player: Side) -> Self {
        let board = Board::new_from_grid(grid);
        let status = match board.is_terminal(first_player) {
            Some(winner) => GameStatus::Victory(winner),
            None => GameStatus::Active,
        };
        CheckersGame { board, turn: TurnState::new(first_player), status }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn turn(&self) -> &TurnState { &self.turn }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn current_player(&self) -> Side { self.turn.current_player }
    pub fn is_active(&self) -> bool { self.status == GameStatus::Active }

    fn check_active(&self) -> Result<(), TurnError> {
        if self.is_active() { Ok(()) } else { Err(TurnError::GameOver) }
    }

    // Selects a piece of the current player. Only moves that are legal given the whole board are
    // kept: if another piece can capture, a piece that can only step is not selectable.
    pub fn select(&mut self, square: Coord) -> Result<&[Move], TurnError> {
        self.check_active()?;
        if self.turn.must_continue_jumping {
            if self.turn.selected != Some(square) {
                return Err(TurnError::MustContinueJumping);
            }
            return Ok(&self.turn.legal_moves_for_selection);
        }
        if self.turn.has_moved {
            return Err(TurnError::TurnAlreadyMade);
        }
        let side = self.turn.current_player;
        let all_moves = self.board.all_legal_moves(side);
        let moves = self
            .board
            .legal_moves(side, square)?
            .into_iter()
            .filter(|mv| all_moves.contains(mv))
            .collect_vec();
        if moves.is_empty() {
            return Err(TurnError::NoLegalMoves);
        }
        self.turn.selected = Some(square);
        self.turn.legal_moves_for_selection = moves;
        Ok(&self.turn.legal_moves_for_selection)
    }

    // Returns whether there was a selection to clear. A forced jump keeps its selection.
    pub fn clear_selection(&mut self) -> bool {
        if self.turn.must_continue_jumping || self.turn.selected.is_none() {
            return false;
        }
        self.turn.selected = None;
        self.turn.legal_moves_for_selection.clear();
        true
    }

    // Among moves of the selected piece.
    pub fn find_selected_move(&self, dest: Coord) -> Option<Move> {
        self.turn.legal_moves_for_selection.iter().copied().find(|mv| mv.dest == dest)
    }

    pub fn try_move(&mut self, side: Side, mv: Move) -> Result<MoveOutcome, TurnError> {
        self.check_active()?;
        if side != self.turn.current_player {
            return Err(TurnError::WrongTurnOrder);
        }
        if self.turn.must_continue_jumping {
            if self.turn.selected != Some(mv.src) {
                return Err(TurnError::MustContinueJumping);
            }
        } else if self.turn.has_moved {
            return Err(TurnError::TurnAlreadyMade);
        }

        let outcome = self.board.apply_move(side, mv)?;
        self.turn.has_moved = true;
        if outcome.continues {
            self.turn.selected = Some(mv.dest);
            self.turn.legal_moves_for_selection = self.board.legal_moves(side, mv.dest)?;
            self.turn.must_continue_jumping = true;
        } else {
            self.turn.selected = None;
            self.turn.legal_moves_for_selection.clear();
            self.turn.must_continue_jumping = false;
        }

        let to_move = if outcome.continues { side } else { side.opponent() };
        if let Some(winner) = self.board.is_terminal(to_move) {
            self.status = GameStatus::Victory(winner);
        }
        Ok(outcome)
    }

    pub fn end_turn(&mut self, side: Side) -> Result<(), TurnError> {
        self.check_active()?;
        if side != self.turn.current_player {
            return Err(TurnError::WrongTurnOrder);
        }
        if self.turn.must_continue_jumping {
            return Err(TurnError::MustContinueJumping);
        }
        if !self.turn.has_moved {
            return Err(TurnError::NoMoveMade);
        }
        self.turn = TurnState::new(side.opponent());
        Ok(())
    }
}
