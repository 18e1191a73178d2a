// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use checkers_p2p::board::Board;
use checkers_p2p::coord::Coord;
use checkers_p2p::piece::Piece;
use checkers_p2p::test_util::parse_grid;


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub kind: checkers_p2p::piece::PieceKind,
    pub side: checkers_p2p::side::Side,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<Piece> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.kind == matcher.kind && piece.side == matcher.side
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($side:ident $kind:ident) => {
        common::PieceMatcher {
            side: checkers_p2p::side::Side::$side,
            kind: checkers_p2p::piece::PieceKind::$kind,
        }
    };
}

// Moves written as `mv!(5 0 -> 4 1)` for a step and `mv!(3 2 x 2 3 -> 1 4)` for a jump.
#[macro_export]
macro_rules! mv {
    ($r1:literal $c1:literal -> $r2:literal $c2:literal) => {
        checkers_p2p::board::Move::simple(
            checkers_p2p::coord::Coord::from_zero_based($r1, $c1),
            checkers_p2p::coord::Coord::from_zero_based($r2, $c2),
        )
    };
    ($r1:literal $c1:literal x $rj:literal $cj:literal -> $r2:literal $c2:literal) => {
        checkers_p2p::board::Move::capture(
            checkers_p2p::coord::Coord::from_zero_based($r1, $c1),
            checkers_p2p::coord::Coord::from_zero_based($rj, $cj),
            checkers_p2p::coord::Coord::from_zero_based($r2, $c2),
        )
    };
}

#[allow(dead_code)]
pub fn sq(row: u8, col: u8) -> Coord { Coord::from_zero_based(row, col) }

#[allow(dead_code)]
pub fn parse_board(board_str: &str) -> Board { Board::new_from_grid(parse_grid(board_str)) }
