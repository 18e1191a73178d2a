#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod event;
pub mod game;
pub mod grid;
pub mod network;
pub mod peer;
pub mod piece;
pub mod rules;
pub mod side;
pub mod test_util;

pub use board::{Board, Move, MoveOutcome, TurnError};
pub use coord::{Col, Coord, Row};
pub use event::{GameId, PeerMessage};
pub use game::{CheckersGame, GameStatus, TurnState};
pub use grid::Grid;
pub use peer::{ActionError, ClickOutcome, ConnectionState, NotableEvent, PeerRole, PeerState};
pub use piece::{Piece, PieceKind};
pub use rules::{FirstMove, Rules};
pub use side::Side;
