//! Per-connection channel driver.
//!
//! Owns one upgraded connection: answers the handshake once, then decodes
//! inbound buffers and emits reply frames over the transport until a close
//! frame is observed. Channels share no state with each other; everything
//! about the exchange lives in the `Channel` value.

use crate::error::ConnectionError;
use crate::frame::{self, Inbound};
use crate::handshake::{HandshakeRequest, HandshakeResponse};
use crate::transport::Transport;
use serde::Serialize;

/// One upgraded WebSocket connection over a [`Transport`].
pub struct Channel<T> {
    transport: T,
    protocol: Option<String>,
    open: bool,
}

impl<T: Transport> Channel<T> {
    /// Parse the upgrade request head, write the 101 response, and return the
    /// open channel. A request that is not a WebSocket upgrade fails before
    /// anything is written; the caller can then send
    /// [`crate::handshake::rejection_response`] and drop the connection.
    pub async fn accept(transport: T, request_head: &[u8]) -> crate::Result<Self> {
        let req = HandshakeRequest::parse(request_head)?;
        let resp = HandshakeResponse::build(&req);
        transport.send(&resp.to_bytes()).await?;
        Ok(Self {
            transport,
            protocol: resp.protocol().map(str::to_string),
            open: true,
        })
    }

    /// Decode one complete inbound frame. Text frames yield their payload;
    /// a close frame marks the channel closed and yields `None`, as do
    /// ignored frames. Decoding is a pure in-memory transform, so this does
    /// not suspend.
    pub fn recv(&mut self, buffer: &[u8]) -> crate::Result<Option<String>> {
        if !self.open {
            return Err(ConnectionError::Closed.into());
        }
        match frame::decode(buffer)? {
            Inbound::Text(text) => Ok(Some(text)),
            Inbound::Closed => {
                tracing::debug!("close frame from peer");
                self.open = false;
                Ok(None)
            }
            Inbound::Ignored => {
                tracing::trace!("ignoring unsupported frame");
                Ok(None)
            }
        }
    }

    /// Send one server text frame.
    pub async fn send_text(&self, payload: &str) -> crate::Result<()> {
        if !self.open {
            return Err(ConnectionError::Closed.into());
        }
        self.transport.send(&frame::text_frame(payload)?).await
    }

    /// Serialize `msg` to JSON and send it as one server text frame.
    pub async fn send_json<M: Serialize>(&self, msg: &M) -> crate::Result<()> {
        if !self.open {
            return Err(ConnectionError::Closed.into());
        }
        self.transport.send(&crate::message::encode(msg)?).await
    }

    /// Send a close frame and close the transport. Idempotent.
    pub async fn close(&mut self) -> crate::Result<()> {
        if self.open {
            self.open = false;
            self.transport.send(&frame::close_frame()).await?;
            self.transport.close().await?;
        }
        Ok(())
    }

    /// Whether the channel is still open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The subprotocol acknowledged during the handshake, if any.
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }
}
