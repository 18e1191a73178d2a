// Defines `PeerState`: the synchronization protocol that keeps two copies of a checkers game in
// agreement, one per peer.
//
// Each peer stores the board with its own pieces at the bottom, so the two copies are mirror
// images of each other. Outgoing messages are mirrored by the sender; incoming messages are
// applied as is. The other peer is not trusted: every incoming step goes through the same rule
// checks as a local one, and anything that does not make sense is logged and dropped.
//
// Events are processed one at a time, to completion. There is no locking: the owner of
// `PeerState` feeds it local input and inbound messages from a single event stream.

use std::sync::mpsc;

use log::{debug, info, warn};

use crate::board::{Move, MoveOutcome, TurnError};
use crate::coord::Coord;
use crate::event::{GameId, PeerMessage};
use crate::game::{CheckersGame, GameStatus};
use crate::network::parse_message;
use crate::rules::Rules;
use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PeerRole {
    // Decides who moves first and starts the game once the channel opens.
    Host,
    Guest,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectionState {
    Idle,
    // Exchanging connection details via an external signaling service.
    Connecting,
    HostWaiting,
    PeerConnecting,
    Active,
    Terminal,
    Disconnected,
}

#[derive(Clone, Debug)]
pub enum IncomingEvent {
    ChannelOpened,
    ChannelError(String),
    ChannelClosed,
    // Raw serialized `PeerMessage`.
    Message(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    None,
    GameStarted,
    // Carries the step in local coordinates. The opponent may still be in the middle of a turn.
    OpponentMoved(Move),
    OpponentTurnEnded,
    GameOver(Side),
    Disconnected,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    MalformedMessage(String),
    UnexpectedMessage(String),
    // The message belongs to a game that has been replaced by a newer one.
    StaleGame { current: GameId, received: GameId },
    IllegalRemoteTurn(TurnError),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ActionError {
    NoGameInProgress,
    NotMyTurn,
    OnlyHostCanRestart,
    Disconnected,
    IllegalTurn(TurnError),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    Selected(Vec<Move>),
    Deselected,
    Moved(MoveOutcome),
}

pub struct PeerState {
    role: PeerRole,
    rules: Rules,
    outgoing: mpsc::Sender<PeerMessage>,
    connection: ConnectionState,
    game_id: GameId,
    // Kept after a disconnect so that the last known board can still be shown.
    game: Option<CheckersGame>,
}

impl PeerState {
    pub fn new(role: PeerRole, rules: Rules, outgoing: mpsc::Sender<PeerMessage>) -> Self {
        PeerState {
            role,
            rules,
            outgoing,
            connection: ConnectionState::Idle,
            game_id: GameId::NONE,
            game: None,
        }
    }

    pub fn role(&self) -> PeerRole { self.role }
    pub fn rules(&self) -> &Rules { &self.rules }
    pub fn connection_state(&self) -> ConnectionState { self.connection }
    pub fn game(&self) -> Option<&CheckersGame> { self.game.as_ref() }
    pub fn game_id(&self) -> GameId { self.game_id }

    pub fn is_my_turn(&self) -> bool {
        self.connection == ConnectionState::Active
            && self.game.as_ref().is_some_and(|game| game.current_player() == Side::Local)
    }
    pub fn selected(&self) -> Option<Coord> {
        self.game.as_ref().and_then(|game| game.turn().selected)
    }
    pub fn highlighted_moves(&self) -> &[Move] {
        self.game
            .as_ref()
            .filter(|game| game.current_player() == Side::Local)
            .map(|game| game.turn().legal_moves_for_selection.as_slice())
            .unwrap_or_default()
    }

    pub fn begin_connecting(&mut self) {
        if self.connection == ConnectionState::Idle {
            self.connection = ConnectionState::Connecting;
        } else {
            warn!("Cannot start connecting in state {:?}", self.connection);
        }
    }

    // Connection details have been exchanged; waiting for the channel to open.
    pub fn signaling_complete(&mut self) {
        if self.connection == ConnectionState::Connecting {
            self.connection = match self.role {
                PeerRole::Host => ConnectionState::HostWaiting,
                PeerRole::Guest => ConnectionState::PeerConnecting,
            };
        } else {
            warn!("Unexpected signaling completion in state {:?}", self.connection);
        }
    }

    // Processes one event to completion. Protocol violations are logged and dropped.
    pub fn apply_event(&mut self, event: IncomingEvent) -> NotableEvent {
        match event {
            IncomingEvent::ChannelOpened => self.on_channel_opened(),
            IncomingEvent::ChannelError(message) => {
                warn!("Peer channel error: {message}");
                self.on_disconnect()
            }
            IncomingEvent::ChannelClosed => {
                info!("Peer channel closed");
                self.on_disconnect()
            }
            IncomingEvent::Message(raw) => {
                let result = parse_message(&raw)
                    .map_err(|err| EventError::MalformedMessage(err.to_string()))
                    .and_then(|msg| self.process_message(msg));
                match result {
                    Ok(notable) => notable,
                    Err(err) => {
                        warn!("Dropping message {raw}: {err:?}");
                        NotableEvent::None
                    }
                }
            }
        }
    }

    pub fn process_message(&mut self, msg: PeerMessage) -> Result<NotableEvent, EventError> {
        if self.connection == ConnectionState::Disconnected {
            return Err(EventError::UnexpectedMessage("peer channel is closed".to_owned()));
        }
        match msg {
            PeerMessage::StartGame { game_id, turn_player } => {
                if self.role == PeerRole::Host {
                    return Err(EventError::UnexpectedMessage(
                        "only the host can start a game".to_owned(),
                    ));
                }
                match self.connection {
                    ConnectionState::PeerConnecting
                    | ConnectionState::Active
                    | ConnectionState::Terminal => {}
                    _ => {
                        return Err(EventError::UnexpectedMessage(format!(
                            "cannot start a game in state {:?}",
                            self.connection
                        )));
                    }
                }
                info!("Game {game_id:?} started, first move: {turn_player:?}");
                self.game_id = game_id;
                self.game = Some(CheckersGame::new(turn_player));
                self.connection = ConnectionState::Active;
                Ok(NotableEvent::GameStarted)
            }
            PeerMessage::Move { game_id, src, dest, jumped } => {
                let mv = Move { src, dest, jumped };
                let game = self.game_for_remote(game_id)?;
                let outcome =
                    game.try_move(Side::Remote, mv).map_err(EventError::IllegalRemoteTurn)?;
                debug!("Opponent moved {mv:?}, outcome {outcome:?}");
                if let GameStatus::Victory(winner) = game.status() {
                    info!("Game over, winner: {winner:?}");
                    self.connection = ConnectionState::Terminal;
                    return Ok(NotableEvent::GameOver(winner));
                }
                Ok(NotableEvent::OpponentMoved(mv))
            }
            PeerMessage::EndTurn { game_id } => {
                let game = self.game_for_remote(game_id)?;
                game.end_turn(Side::Remote).map_err(EventError::IllegalRemoteTurn)?;
                Ok(NotableEvent::OpponentTurnEnded)
            }
        }
    }

    // Clicking a square: selects a piece, moves the selected piece, or deselects it.
    pub fn click(&mut self, square: Coord) -> Result<ClickOutcome, ActionError> {
        if let Some(mv) = self.my_game_mut()?.find_selected_move(square) {
            return self.make_local_move(mv).map(ClickOutcome::Moved);
        }
        let game = self.my_game_mut()?;
        if game.turn().selected == Some(square) && game.clear_selection() {
            return Ok(ClickOutcome::Deselected);
        }
        let moves = game.select(square).map_err(ActionError::IllegalTurn)?;
        Ok(ClickOutcome::Selected(moves.to_vec()))
    }

    pub fn make_move(&mut self, src: Coord, dest: Coord) -> Result<MoveOutcome, ActionError> {
        let game = self.my_game_mut()?;
        game.select(src).map_err(ActionError::IllegalTurn)?;
        let mv = game
            .find_selected_move(dest)
            .ok_or(ActionError::IllegalTurn(TurnError::IllegalMove))?;
        self.make_local_move(mv)
    }

    // Host only: discards the current game, if any, and starts a fresh one. Steps of the old game
    // that are still in flight will be dropped by both peers because of the new game ID.
    pub fn new_game(&mut self) -> Result<(), ActionError> {
        if self.role != PeerRole::Host {
            return Err(ActionError::OnlyHostCanRestart);
        }
        match self.connection {
            ConnectionState::Active | ConnectionState::Terminal => {
                self.start_game();
                Ok(())
            }
            ConnectionState::Disconnected => Err(ActionError::Disconnected),
            _ => Err(ActionError::NoGameInProgress),
        }
    }

    fn on_channel_opened(&mut self) -> NotableEvent {
        match (self.role, self.connection) {
            (PeerRole::Host, ConnectionState::Connecting | ConnectionState::HostWaiting) => {
                self.start_game();
                if self.connection == ConnectionState::Disconnected {
                    NotableEvent::Disconnected
                } else {
                    NotableEvent::GameStarted
                }
            }
            (PeerRole::Guest, ConnectionState::Connecting | ConnectionState::PeerConnecting) => {
                self.connection = ConnectionState::PeerConnecting;
                NotableEvent::None
            }
            (_, connection) => {
                warn!("Unexpected channel opening in state {connection:?}");
                NotableEvent::None
            }
        }
    }

    fn on_disconnect(&mut self) -> NotableEvent {
        self.connection = ConnectionState::Disconnected;
        NotableEvent::Disconnected
    }

    fn start_game(&mut self) {
        let first_player = self.rules.first_move.resolve(&mut rand::rng());
        self.game_id = self.game_id.next();
        info!("Starting game {:?}, first move: {first_player:?}", self.game_id);
        self.game = Some(CheckersGame::new(first_player));
        self.connection = ConnectionState::Active;
        self.send(PeerMessage::start_game(self.game_id, first_player));
    }

    fn game_for_remote(&mut self, game_id: GameId) -> Result<&mut CheckersGame, EventError> {
        if game_id != self.game_id {
            return Err(EventError::StaleGame { current: self.game_id, received: game_id });
        }
        self.game
            .as_mut()
            .ok_or_else(|| EventError::UnexpectedMessage("no game in progress".to_owned()))
    }

    fn my_game_mut(&mut self) -> Result<&mut CheckersGame, ActionError> {
        match self.connection {
            ConnectionState::Active => {}
            ConnectionState::Terminal => return Err(ActionError::IllegalTurn(TurnError::GameOver)),
            ConnectionState::Disconnected => return Err(ActionError::Disconnected),
            _ => return Err(ActionError::NoGameInProgress),
        }
        let game = self.game.as_mut().ok_or(ActionError::NoGameInProgress)?;
        if game.current_player() != Side::Local {
            return Err(ActionError::NotMyTurn);
        }
        Ok(game)
    }

    // Applies the step locally, then sends it. The turn is handed over right away unless the
    // same piece has to jump again or the game is over.
    //
    // Once the step is applied the result is `Ok` even if sending fails: the board has changed,
    // and the failure shows up as the `Disconnected` connection state.
    fn make_local_move(&mut self, mv: Move) -> Result<MoveOutcome, ActionError> {
        let game_id = self.game_id;
        let game = self.my_game_mut()?;
        let outcome = game.try_move(Side::Local, mv).map_err(ActionError::IllegalTurn)?;
        debug!("Moved {mv:?}, outcome {outcome:?}");
        let hand_over = game.is_active() && !outcome.continues;
        if hand_over {
            game.end_turn(Side::Local).map_err(ActionError::IllegalTurn)?;
        }
        if let GameStatus::Victory(winner) = game.status() {
            info!("Game over, winner: {winner:?}");
            self.connection = ConnectionState::Terminal;
        }
        self.send(PeerMessage::from_local_move(game_id, mv));
        if hand_over {
            self.send(PeerMessage::EndTurn { game_id });
        }
        Ok(outcome)
    }

    fn send(&mut self, msg: PeerMessage) {
        if self.connection == ConnectionState::Disconnected {
            return;
        }
        if self.outgoing.send(msg).is_err() {
            warn!("Cannot send to peer: channel is closed");
            self.connection = ConnectionState::Disconnected;
        }
    }
}
