use std::io;
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, anyhow};
use checkers_p2p::coord::{Col, Coord, Row};
use checkers_p2p::event::PeerMessage;
use checkers_p2p::game::GameStatus;
use checkers_p2p::peer::{
    ActionError, ConnectionState, IncomingEvent, NotableEvent, PeerRole, PeerState,
};
use checkers_p2p::rules::Rules;
use checkers_p2p::side::Side;
use console::{Style, Term};
use itertools::Itertools;
use log::{info, warn};
use tungstenite::WebSocket;
use tungstenite::protocol::Role;

use crate::config::ConsoleConfig;
use crate::network;
use crate::tui;


enum ConsoleEvent {
    Peer(IncomingEvent),
    Input(String),
    InputClosed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Command {
    Click(Coord),
    Move(Coord, Coord),
    NewGame,
    Quit,
}

const USAGE: &str = "Commands: '<row> <col>' to click a square, '<row> <col> <row> <col>' to move, \
                     'new' to start a new game (host only), 'quit' to exit";

fn parse_coord(row: &str, col: &str) -> Result<Coord, String> {
    let parse_idx = |s: &str| s.parse::<i8>().ok();
    let row = parse_idx(row).and_then(Row::try_from_zero_based);
    let col = parse_idx(col).and_then(Col::try_from_zero_based);
    match (row, col) {
        (Some(row), Some(col)) => Ok(Coord::new(row, col)),
        _ => Err("Rows and columns go from 0 to 7".to_owned()),
    }
}

fn parse_command(input: &str) -> Result<Command, String> {
    match input.split_whitespace().collect_vec().as_slice() {
        ["quit"] => Ok(Command::Quit),
        ["new"] => Ok(Command::NewGame),
        [row, col] => Ok(Command::Click(parse_coord(row, col)?)),
        [src_row, src_col, dest_row, dest_col] => Ok(Command::Move(
            parse_coord(src_row, src_col)?,
            parse_coord(dest_row, dest_col)?,
        )),
        _ => Err(USAGE.to_owned()),
    }
}

fn describe_action_error(err: &ActionError) -> String {
    match err {
        ActionError::NoGameInProgress => "No game in progress".to_owned(),
        ActionError::NotMyTurn => "Wait for the opponent to finish their turn".to_owned(),
        ActionError::OnlyHostCanRestart => "Only the host can start a new game".to_owned(),
        ActionError::Disconnected => "The opponent has disconnected".to_owned(),
        ActionError::IllegalTurn(err) => format!("Illegal move: {err:?}"),
    }
}

fn describe_notable_event(event: &NotableEvent) -> Option<String> {
    match event {
        NotableEvent::None => None,
        NotableEvent::GameStarted => Some("New game started".to_owned()),
        NotableEvent::OpponentMoved(mv) => Some(format!(
            "Opponent moved {} {} -> {} {}",
            mv.src.row.to_zero_based(),
            mv.src.col.to_zero_based(),
            mv.dest.row.to_zero_based(),
            mv.dest.col.to_zero_based(),
        )),
        NotableEvent::OpponentTurnEnded => Some("Your turn".to_owned()),
        NotableEvent::GameOver(_) => Some("Game over".to_owned()),
        NotableEvent::Disconnected => Some("Connection lost".to_owned()),
    }
}

fn status_line(peer: &PeerState) -> String {
    match peer.connection_state() {
        ConnectionState::Idle
        | ConnectionState::Connecting
        | ConnectionState::HostWaiting
        | ConnectionState::PeerConnecting => "Waiting for the game to start...".to_owned(),
        ConnectionState::Active => {
            if peer.is_my_turn() {
                Style::new().bold().apply_to("Your turn").to_string()
            } else {
                Style::new().dim().apply_to("Opponent's turn").to_string()
            }
        }
        ConnectionState::Terminal => {
            let result = match peer.game().map(|game| game.status()) {
                Some(GameStatus::Victory(Side::Local)) => "You won!",
                Some(GameStatus::Victory(Side::Remote)) => "You lost.",
                Some(GameStatus::Active) | None => "Game over.",
            };
            match peer.role() {
                PeerRole::Host => format!("{result} Type 'new' to play again."),
                PeerRole::Guest => format!("{result} Waiting for the host to start a new game."),
            }
        }
        ConnectionState::Disconnected => {
            Style::new().red().apply_to("Disconnected").to_string()
        }
    }
}

fn render(
    term: &Term, peer: &PeerState, notice: &Option<String>, command_error: &Option<String>,
) -> io::Result<()> {
    term.clear_screen()?;
    if let Some(game) = peer.game() {
        term.write_line(&tui::render_grid(
            game.board().grid(),
            peer.selected(),
            peer.highlighted_moves(),
        ))?;
    }
    term.write_line(&status_line(peer))?;
    if let Some(notice) = notice {
        term.write_line(&Style::new().magenta().apply_to(notice).to_string())?;
    }
    if let Some(err) = command_error {
        term.write_line(&Style::new().red().apply_to(err).to_string())?;
    }
    term.write_line(&Style::new().dim().apply_to(USAGE).to_string())?;
    Ok(())
}

fn execute_command(peer: &mut PeerState, command: Command) -> Result<(), ActionError> {
    match command {
        Command::Click(square) => peer.click(square).map(|_| ()),
        Command::Move(src, dest) => peer.make_move(src, dest).map(|_| ()),
        Command::NewGame => peer.new_game(),
        Command::Quit => Ok(()),
    }
}

pub fn run_host(config: ConsoleConfig) -> anyhow::Result<()> {
    let (outgoing_tx, outgoing_rx) = mpsc::channel();
    let mut peer = PeerState::new(PeerRole::Host, config.rules, outgoing_tx);
    peer.begin_connecting();
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .with_context(|| format!("Failed to listen on port {}", config.port))?;
    peer.signaling_complete();
    println!("Waiting for the opponent on port {}...", config.port);
    let (stream, address) = listener.accept().context("Failed to accept connection")?;
    info!("Opponent connected from {address}");
    let socket =
        tungstenite::accept(stream).map_err(|err| anyhow!("WebSocket handshake failed: {err}"))?;
    run(peer, socket, Role::Server, outgoing_rx)
}

pub fn run_guest(address: &str) -> anyhow::Result<()> {
    let (outgoing_tx, outgoing_rx) = mpsc::channel();
    // Game rules are decided by the host.
    let mut peer = PeerState::new(PeerRole::Guest, Rules::default(), outgoing_tx);
    peer.begin_connecting();
    let address = if address.contains(':') {
        address.to_owned()
    } else {
        format!("{address}:{}", network::DEFAULT_PORT)
    };
    println!("Connecting to {address}...");
    let stream = TcpStream::connect(&address)
        .with_context(|| format!("Failed to connect to {address}"))?;
    let (socket, _) = tungstenite::client(format!("ws://{address}/"), stream)
        .map_err(|err| anyhow!("WebSocket handshake failed: {err}"))?;
    peer.signaling_complete();
    run(peer, socket, Role::Client, outgoing_rx)
}

fn run(
    mut peer: PeerState, socket: WebSocket<TcpStream>, role: Role,
    outgoing_rx: mpsc::Receiver<PeerMessage>,
) -> anyhow::Result<()> {
    let mut socket_in = socket;
    let mut socket_out =
        network::clone_websocket(&socket_in, role).context("Failed to clone socket")?;

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_input = tx;
    thread::spawn(move || {
        loop {
            let event = match network::read_text(&mut socket_in) {
                Ok(text) => IncomingEvent::Message(text),
                Err(err) if err.is_clean_close() => IncomingEvent::ChannelClosed,
                Err(err) => IncomingEvent::ChannelError(format!("{err:?}")),
            };
            let channel_done = !matches!(event, IncomingEvent::Message(_));
            if tx_net.send(ConsoleEvent::Peer(event)).is_err() || channel_done {
                break;
            }
        }
    });
    thread::spawn(move || {
        for line in io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx_input.send(ConsoleEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx_input.send(ConsoleEvent::InputClosed);
    });
    // Exits when the socket breaks. Dropping `outgoing_rx` then makes the next send fail, which
    // the peer reports as a disconnect.
    thread::spawn(move || {
        for msg in outgoing_rx {
            if let Err(err) = network::write_message(&mut socket_out, &msg) {
                warn!("Cannot send {msg:?}: {err:?}");
                break;
            }
        }
    });

    let term = Term::stdout();
    let mut notice = describe_notable_event(&peer.apply_event(IncomingEvent::ChannelOpened));
    let mut command_error = None;
    render(&term, &peer, &notice, &command_error)?;
    for event in rx {
        match event {
            ConsoleEvent::Peer(event) => {
                let notable = peer.apply_event(event);
                if notable != NotableEvent::None {
                    notice = describe_notable_event(&notable);
                }
            }
            ConsoleEvent::Input(line) => {
                command_error = match parse_command(&line) {
                    Ok(Command::Quit) => return Ok(()),
                    Ok(command) => execute_command(&mut peer, command)
                        .err()
                        .map(|err| describe_action_error(&err)),
                    Err(err) => Some(err),
                };
            }
            ConsoleEvent::InputClosed => return Ok(()),
        }
        render(&term, &peer, &notice, &command_error)?;
    }
    Ok(())
}
