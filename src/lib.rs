//! # ws-channel
//!
//! WebSocket upgrade handshake and frame codec for single-connection JSON
//! text channels.
//!
//! ## Features
//!
//! - `Sec-WebSocket-Accept` derivation and 101 response assembly, with
//!   optional `json` subprotocol acknowledgment
//! - Inbound frame decoding: opcode dispatch (text vs. close), both supported
//!   payload-length forms, client-side mask removal, bounds-checked reads
//! - Outbound frame encoding: unmasked server frames, masked client frames
//! - JSON message adapter layered over the raw codec
//! - Per-connection channel driver over a pluggable async transport
//!
//! Fragmentation, ping/pong, extensions, and the 64-bit length form are out
//! of scope; the last of these fails with a typed error rather than
//! truncating.
//!
//! ## Example
//!
//! ```
//! use ws_channel::frame::{self, Inbound};
//!
//! fn main() -> ws_channel::Result<()> {
//!     // A client masks its frames; the decoder removes the mask.
//!     let wire = frame::masked_text_frame(r#"{"message":"Hello from the client!"}"#)?;
//!     match frame::decode(&wire)? {
//!         Inbound::Text(text) => assert!(text.contains("Hello from the client!")),
//!         other => panic!("unexpected {other:?}"),
//!     }
//!
//!     // Server replies are never masked.
//!     let reply = frame::text_frame(r#"{"message":"Hello from the server"}"#)?;
//!     assert_eq!(reply[0], 0x81);
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod message;
pub mod transport;

pub use channel::Channel;
pub use error::{Error, Result};
pub use frame::{Inbound, Opcode};
pub use handshake::{accept_value, HandshakeRequest, HandshakeResponse};
pub use message::Decoded;
pub use transport::Transport;
