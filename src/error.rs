use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a WebSocket channel.
#[derive(Error, Debug)]
pub enum Error {
    #[error("handshake: {0}")]
    Handshake(#[from] HandshakeError),

    #[error("frame: {0}")]
    Frame(#[from] FrameError),

    #[error("payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("connection: {0}")]
    Connection(#[from] ConnectionError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Upgrade handshake rejections. All recoverable: the caller writes a 400
/// response and drops the connection.
#[derive(Error, Debug)]
pub enum HandshakeError {
    #[error("not a websocket upgrade request")]
    NotAnUpgrade,

    #[error("missing Sec-WebSocket-Key header")]
    MissingKey,

    #[error("malformed upgrade request: {0}")]
    Malformed(String),
}

/// Frame-level wire errors.
#[derive(Error, Debug)]
pub enum FrameError {
    /// The buffer ended before a declared field. Detected by bounds check;
    /// the decoder never reads past the supplied bytes.
    #[error("truncated frame: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        needed: usize,
        offset: usize,
        available: usize,
    },

    /// A 64-bit length field was declared on decode, or an encode payload
    /// exceeds the 16-bit length form. Neither is supported.
    #[error("unsupported payload size: the 64-bit length form is not implemented")]
    UnsupportedPayloadSize,
}

/// Malformed text payload content.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connection-level errors reported by the channel driver.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("channel is closed")]
    Closed,

    #[error("transport: {0}")]
    Transport(String),
}
