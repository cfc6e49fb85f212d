//! JSON message contract layered over the frame codec.
//!
//! The frame engine moves raw UTF-8 text; this adapter owns JSON
//! (de)serialization so the codec stays reusable for arbitrary payloads.

use crate::error::PayloadError;
use crate::frame::{self, Inbound};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Result of decoding one inbound frame through the JSON contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<M> {
    /// A text frame whose payload parsed as `M`.
    Message(M),

    /// The peer sent a close frame.
    Closed,

    /// An unsupported frame; see [`Inbound::Ignored`].
    Ignored,
}

/// Serialize `msg` to JSON and wrap it in a single server text frame.
pub fn encode<M: Serialize>(msg: &M) -> crate::Result<Vec<u8>> {
    let json = serde_json::to_string(msg).map_err(PayloadError::from)?;
    frame::text_frame(&json)
}

/// Decode one inbound frame, parsing text payloads as JSON.
pub fn decode<M: DeserializeOwned>(buffer: &[u8]) -> crate::Result<Decoded<M>> {
    match frame::decode(buffer)? {
        Inbound::Text(text) => {
            let msg = serde_json::from_str(&text).map_err(PayloadError::from)?;
            Ok(Decoded::Message(msg))
        }
        Inbound::Closed => Ok(Decoded::Closed),
        Inbound::Ignored => Ok(Decoded::Ignored),
    }
}
