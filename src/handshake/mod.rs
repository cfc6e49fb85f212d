//! HTTP-to-WebSocket upgrade handshake.
//!
//! Derives the `Sec-WebSocket-Accept` value from the client key and builds
//! the 101 response header lines. The caller owns the socket and writes the
//! joined lines; parsing here stops at the blank line ending the head.

use crate::error::HandshakeError;
use base64::Engine;
use sha1::{Digest, Sha1};
use std::collections::HashMap;

/// Fixed GUID appended to the client key before hashing (RFC 6455).
const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// The only subprotocol this engine acknowledges.
const SUPPORTED_PROTOCOL: &str = "json";

/// Derive the `Sec-WebSocket-Accept` value: Base64 of the SHA-1 digest of
/// the client key concatenated with the fixed GUID. Pure and deterministic.
pub fn accept_value(client_key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(client_key.as_bytes());
    hasher.update(WS_GUID.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}

/// Immutable view of an inbound upgrade request.
#[derive(Debug, Clone)]
pub struct HandshakeRequest {
    /// Request path from the request line.
    pub path: String,

    /// Client-supplied `Sec-WebSocket-Key`, opaque.
    pub key: String,

    /// Requested subprotocols in client order; empty when the
    /// `Sec-WebSocket-Protocol` header is absent.
    pub protocols: Vec<String>,

    /// All request headers, names lowercased.
    pub headers: HashMap<String, String>,
}

impl HandshakeRequest {
    /// Parse a raw HTTP request head. Only GET requests carrying a
    /// case-insensitive `Upgrade: websocket` header are eligible; anything
    /// else is rejected so the caller can answer with
    /// [`rejection_response`] and drop the connection.
    pub fn parse(head: &[u8]) -> crate::Result<Self> {
        let text = std::str::from_utf8(head)
            .map_err(|_| HandshakeError::Malformed("request head is not UTF-8".into()))?;

        let mut lines = text.lines();
        let request_line = lines
            .next()
            .ok_or_else(|| HandshakeError::Malformed("empty request".into()))?;
        let mut parts = request_line.split_whitespace();
        let method = parts
            .next()
            .ok_or_else(|| HandshakeError::Malformed("missing method".into()))?;
        let path = parts
            .next()
            .ok_or_else(|| HandshakeError::Malformed("missing request path".into()))?
            .to_string();

        if method != "GET" {
            return Err(HandshakeError::NotAnUpgrade.into());
        }

        let mut headers = HashMap::new();
        for line in lines {
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_lowercase(), value.trim().to_string());
            }
        }

        if !headers
            .get("upgrade")
            .is_some_and(|v| v.eq_ignore_ascii_case("websocket"))
        {
            return Err(HandshakeError::NotAnUpgrade.into());
        }

        let key = headers
            .get("sec-websocket-key")
            .ok_or(HandshakeError::MissingKey)?
            .clone();

        // Absent header means no protocols were requested.
        let protocols = headers
            .get("sec-websocket-protocol")
            .map(|p| p.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        Ok(Self {
            path,
            key,
            protocols,
            headers,
        })
    }
}

/// Ordered response header lines for a successful upgrade. Terminal: built
/// once, written to the socket, then discarded.
#[derive(Debug)]
pub struct HandshakeResponse {
    lines: Vec<String>,
    protocol: Option<String>,
}

impl HandshakeResponse {
    /// Assemble the 101 response for the given request: status line, the
    /// `Upgrade`/`Connection` pair, the derived accept value, and the `json`
    /// subprotocol acknowledgment when the client asked for it.
    pub fn build(req: &HandshakeRequest) -> Self {
        let mut lines = vec![
            "HTTP/1.1 101 Web Socket Protocol Handshake".to_string(),
            "Upgrade: WebSocket".to_string(),
            "Connection: Upgrade".to_string(),
            format!("Sec-WebSocket-Accept: {}", accept_value(&req.key)),
        ];

        let protocol = req
            .protocols
            .iter()
            .find(|p| p.as_str() == SUPPORTED_PROTOCOL)
            .cloned();
        if let Some(ref p) = protocol {
            lines.push(format!("Sec-WebSocket-Protocol: {p}"));
        }

        tracing::debug!(path = %req.path, protocol = ?protocol, "upgrade accepted");
        Self { lines, protocol }
    }

    /// Header lines in response order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The acknowledged subprotocol, if any.
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Join the lines CRLF-terminated, plus the blank line ending the head.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.lines.join("\r\n");
        out.push_str("\r\n\r\n");
        out.into_bytes()
    }
}

/// Response for requests that are not WebSocket upgrades.
pub fn rejection_response() -> Vec<u8> {
    b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec()
}
