// Message codec. Framing and delivery are the transport's concern; the peer channel is assumed
// to be ordered and reliable.

use crate::event::PeerMessage;


pub fn serialize_message(msg: &PeerMessage) -> String {
    // Cannot fail: `PeerMessage` has no maps with non-string keys and no custom serializers
    // that could error.
    serde_json::to_string(msg).unwrap()
}

pub fn parse_message(s: &str) -> Result<PeerMessage, serde_json::Error> { serde_json::from_str(s) }
