mod common;

use checkers_p2p::board::{Board, Move, MoveOutcome, TurnError};
use checkers_p2p::coord::Coord;
use checkers_p2p::grid::Grid;
use checkers_p2p::piece::Piece;
use checkers_p2p::side::Side;
use checkers_p2p::test_util::deterministic_rng;
use common::*;
use pretty_assertions::assert_eq;
use rand::seq::IndexedRandom;
use strum::IntoEnumIterator;


#[test]
fn simple_step_when_no_capture_anywhere() {
    let mut grid = Grid::starting_position();
    grid[sq(2, 1)] = None;
    let board = Board::new_from_grid(grid);
    assert_eq!(board.legal_moves(Side::Local, sq(5, 0)).unwrap(), vec![mv!(5 0 -> 4 1)]);
    let all_moves = board.all_legal_moves(Side::Local);
    assert!(all_moves.contains(&mv!(5 0 -> 4 1)));
    assert!(all_moves.iter().all(|mv| !mv.is_capture()));
}

#[test]
fn single_capture_suppresses_steps() {
    let board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . x . . . .
        . . o . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    assert_eq!(board.legal_moves(Side::Local, sq(3, 2)).unwrap(), vec![mv!(3 2 x 2 3 -> 1 4)]);
}

#[test]
fn man_moves_forward_only() {
    let board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . o . . . . .
        . . . x . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    assert_eq!(board.legal_moves(Side::Local, sq(3, 2)).unwrap(), vec![
        mv!(3 2 -> 2 1),
        mv!(3 2 -> 2 3),
    ]);
    // Remote men move down the board, so neither man can capture the other.
    assert_eq!(board.legal_moves(Side::Remote, sq(4, 3)).unwrap(), vec![
        mv!(4 3 -> 5 2),
        mv!(4 3 -> 5 4),
    ]);
}

#[test]
fn king_moves_in_all_directions() {
    let board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . O . . . . .
        . . . x . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    assert_eq!(board.legal_moves(Side::Local, sq(3, 2)).unwrap(), vec![mv!(3 2 x 4 3 -> 5 4)]);

    let board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . O . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . x .
    ",
    );
    assert_eq!(board.legal_moves(Side::Local, sq(3, 2)).unwrap().len(), 4);
}

#[test]
fn mandatory_capture_is_global() {
    let board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . x . . .
        . . . o . . . .
        o . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    assert_eq!(board.all_legal_moves(Side::Local), vec![mv!(4 3 x 3 4 -> 2 5)]);
    // A per-piece query only applies the rule to the piece itself.
    assert_eq!(board.legal_moves(Side::Local, sq(5, 0)).unwrap(), vec![mv!(5 0 -> 4 1)]);

    let mut board = board;
    assert_eq!(board.apply_move(Side::Local, mv!(5 0 -> 4 1)), Err(TurnError::IllegalMove));
}

#[test]
fn jump_chain_may_change_direction() {
    let mut board = parse_board(
        "
        . x . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . x . . .
        . . . . . . . .
        . . . . x . . .
        . . . . . o . .
        . . . . . . . .
    ",
    );
    let outcome = board.apply_move(Side::Local, mv!(6 5 x 5 4 -> 4 3)).unwrap();
    assert!(outcome.continues);
    assert_eq!(board.legal_moves(Side::Local, sq(4, 3)).unwrap(), vec![mv!(4 3 x 3 4 -> 2 5)]);
    let outcome = board.apply_move(Side::Local, mv!(4 3 x 3 4 -> 2 5)).unwrap();
    assert!(!outcome.continues);
    assert!(board.occupant(sq(2, 5)).is(piece!(Local Man)));
    assert_eq!(board.piece_counts()[Side::Remote], 1);
}

#[test]
fn king_jump_chain_turns_back_up() {
    let mut board = parse_board(
        "
        . . . . . . . x
        . . . . . . . .
        . O . . . . . .
        . . x . x . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    let outcome = board.apply_move(Side::Local, mv!(2 1 x 3 2 -> 4 3)).unwrap();
    assert!(outcome.continues);
    let outcome = board.apply_move(Side::Local, mv!(4 3 x 3 4 -> 2 5)).unwrap();
    assert_eq!(outcome, MoveOutcome {
        continues: false,
        promoted: false,
        captured: Some(Piece::man(Side::Remote)),
    });
    assert!(board.occupant(sq(2, 5)).is(piece!(Local King)));
}

#[test]
fn promotion_ends_jump_chain() {
    let mut board = parse_board(
        "
        . . . . . . . .
        . . . . x . x .
        . . . o . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    let outcome = board.apply_move(Side::Local, mv!(2 3 x 1 4 -> 0 5)).unwrap();
    assert_eq!(outcome, MoveOutcome {
        continues: false,
        promoted: true,
        captured: Some(Piece::man(Side::Remote)),
    });
    assert!(board.occupant(sq(0, 5)).is(piece!(Local King)));
    // The new king could capture, but only on the next turn.
    assert_eq!(board.legal_moves(Side::Local, sq(0, 5)).unwrap(), vec![mv!(0 5 x 1 6 -> 2 7)]);
}

#[test]
fn remote_promotes_on_bottom_row() {
    let mut board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . x . . . . . .
        . . . . . . o .
    ",
    );
    let outcome = board.apply_move(Side::Remote, mv!(6 1 -> 7 2)).unwrap();
    assert!(outcome.promoted);
    assert!(!outcome.continues);
    assert!(board.occupant(sq(7, 2)).is(piece!(Remote King)));
}

#[test]
fn capturing_last_piece_ends_game() {
    let mut board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . x . . . .
        . . o . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    assert_eq!(board.is_terminal(Side::Local), None);
    board.apply_move(Side::Local, mv!(3 2 x 2 3 -> 1 4)).unwrap();
    assert_eq!(board.is_terminal(Side::Remote), Some(Side::Local));
    assert_eq!(board.is_terminal(Side::Local), Some(Side::Local));
}

#[test]
fn blocked_side_loses_on_its_turn() {
    let board = parse_board(
        "
        . . . . . . . .
        . . . . . . . .
        . . . x . . . .
        x . x . . . . .
        . o . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ",
    );
    assert_eq!(board.legal_moves(Side::Local, sq(4, 1)).unwrap(), vec![]);
    assert_eq!(board.is_terminal(Side::Local), Some(Side::Remote));
    assert_eq!(board.is_terminal(Side::Remote), None);
}

#[test]
fn empty_square_and_opponent_piece_are_rejected() {
    let board = Board::new();
    assert_eq!(board.legal_moves(Side::Remote, sq(3, 0)), Err(TurnError::EmptySquare));
    assert_eq!(board.legal_moves(Side::Remote, sq(7, 0)), Err(TurnError::NotOwnPiece));
}

// Plays random games and checks properties that must hold in every position.
#[test]
fn random_playouts_keep_invariants() {
    let mut rng = deterministic_rng();
    for _ in 0..40 {
        let mut board = Board::new();
        let mut side = Side::Local;
        let mut chain_piece: Option<Coord> = None;
        for _ in 0..300 {
            for coord in Coord::all().filter(|coord| !coord.is_dark()) {
                assert_eq!(board.occupant(coord), None);
            }
            if board.is_terminal(side).is_some() {
                break;
            }
            let all_moves = board.all_legal_moves(side);
            assert!(!all_moves.is_empty(), "{:?}", board.grid());
            if all_moves.iter().any(Move::is_capture) {
                assert!(all_moves.iter().all(Move::is_capture));
            }
            for (coord, _) in board.grid().pieces(side) {
                assert_eq!(board.legal_moves(side, coord), board.legal_moves(side, coord));
            }
            let candidates = match chain_piece {
                Some(from) => board.legal_moves(side, from).unwrap(),
                None => all_moves,
            };
            let mv = *candidates.choose(&mut rng).unwrap();
            let outcome = board.apply_move(side, mv).unwrap();
            if outcome.promoted {
                assert!(!outcome.continues);
            }
            if outcome.continues {
                chain_piece = Some(mv.dest);
            } else {
                chain_piece = None;
                side = side.opponent();
            }
        }
        let counts = board.piece_counts();
        assert!(Side::iter().all(|side| counts[side] <= 12));
    }
}
