//! End-to-end demo: upgrade handshake plus one frame exchange over an
//! in-memory transport standing in for the raw socket.
//!
//! Run with: `cargo run --example echo`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use ws_channel::{frame, Channel, Transport};

#[derive(Debug, Serialize, Deserialize)]
struct Chat {
    message: String,
}

/// Collects everything the channel writes so we can show the wire bytes.
struct MemoryTransport {
    written: Arc<Mutex<Vec<Vec<u8>>>>,
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, data: &[u8]) -> ws_channel::Result<()> {
        self.written.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn close(&self) -> ws_channel::Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let written = Arc::new(Mutex::new(Vec::new()));
    let transport = MemoryTransport {
        written: Arc::clone(&written),
    };

    let head = b"GET /chat HTTP/1.1\r\n\
        Host: localhost:3210\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
        Sec-WebSocket-Protocol: json, xml\r\n\
        \r\n";
    let mut channel = Channel::accept(transport, head).await?;
    println!("--- handshake response ---");
    print!(
        "{}",
        String::from_utf8_lossy(&written.lock().unwrap()[0])
    );

    // What a browser puts on the wire for ws.send(json): a masked text frame.
    let inbound = frame::masked_text_frame(r#"{"message":"Hello from the client!"}"#)?;
    if let Some(payload) = channel.recv(&inbound)? {
        let chat: Chat = serde_json::from_str(&payload)?;
        println!("client says: {}", chat.message);
        channel
            .send_json(&Chat {
                message: "Hello from the server".to_string(),
            })
            .await?;
        let reply = &written.lock().unwrap()[1];
        println!(
            "reply frame: {:02x} {:02x} + {} payload bytes",
            reply[0],
            reply[1],
            reply.len() - 2
        );
    }

    // The browser closing the tab sends a close frame.
    channel.recv(&[0x88, 0x00])?;
    println!("channel open after close frame: {}", channel.is_open());
    Ok(())
}
