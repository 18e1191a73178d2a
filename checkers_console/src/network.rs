// WebSocket transport for the peer channel. One text frame carries one serialized `PeerMessage`.

use std::io;
use std::net::TcpStream;

use checkers_p2p::event::PeerMessage;
use checkers_p2p::network::serialize_message;
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};


pub const DEFAULT_PORT: u16 = 38617;


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    ConnectionClosed,
}

impl CommunicationError {
    pub fn is_clean_close(&self) -> bool {
        matches!(
            self,
            CommunicationError::ConnectionClosed
                | CommunicationError::Socket(
                    tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed
                )
        )
    }
}

pub fn write_message<S>(
    socket: &mut WebSocket<S>, msg: &PeerMessage,
) -> Result<(), CommunicationError>
where
    S: io::Read + io::Write,
{
    socket
        .send(Message::text(serialize_message(msg)))
        .map_err(CommunicationError::Socket)
}

// Returns the next text frame as is: decoding belongs to the protocol, which treats garbage as a
// violation rather than a transport failure. Control frames are skipped.
pub fn read_text<S>(socket: &mut WebSocket<S>) -> Result<String, CommunicationError>
where
    S: io::Read + io::Write,
{
    loop {
        match socket.read().map_err(CommunicationError::Socket)? {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Binary(data) => return Ok(String::from_utf8_lossy(&data).into_owned()),
            Message::Close(_) => return Err(CommunicationError::ConnectionClosed),
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
}

// A second handle on the same connection, so that reading and writing can happen in different
// threads.
pub fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    Ok(WebSocket::from_raw_socket(stream, role, None))
}
