use serde::{Deserialize, Serialize};

use crate::board::Move;
use crate::coord::Coord;
use crate::side::Side;


// Identifies one game between the two peers. The host picks a new one for every StartGame and
// both peers stamp it on every Move and EndTurn, so that a step made in a game that has since
// been restarted is recognized as stale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u32);

impl GameId {
    // Not used by any real game: the host starts counting from `next()` of this.
    pub const NONE: GameId = GameId(0);

    pub fn next(self) -> Self { GameId(self.0.wrapping_add(1).max(1)) }
}

// Messages exchanged by the two peers. Every side and coordinate is expressed from the receiver's
// point of view: the sender mirrors them before sending, so the receiver applies them as is.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PeerMessage {
    // Sent by the host. `turn_player` is the side that moves first, as seen by the guest.
    StartGame {
        game_id: GameId,
        turn_player: Side,
    },
    // One step of a turn, including each intermediate jump of a chain.
    Move {
        game_id: GameId,
        src: Coord,
        dest: Coord,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        jumped: Option<Coord>,
    },
    EndTurn {
        game_id: GameId,
    },
}

impl PeerMessage {
    pub fn start_game(game_id: GameId, local_first_player: Side) -> Self {
        PeerMessage::StartGame { game_id, turn_player: local_first_player.mirrored() }
    }

    pub fn from_local_move(game_id: GameId, mv: Move) -> Self {
        let Move { src, dest, jumped } = mv.mirrored();
        PeerMessage::Move { game_id, src, dest, jumped }
    }

    pub fn game_id(&self) -> GameId {
        match self {
            PeerMessage::StartGame { game_id, .. }
            | PeerMessage::Move { game_id, .. }
            | PeerMessage::EndTurn { game_id } => *game_id,
        }
    }
}
