//! Transport abstraction under the channel driver.
//!
//! Implement this trait to plug in the raw socket. The bootstrap layer owns
//! the listening socket and buffers partial TCP segments; the channel only
//! ever sees complete frames and writes complete responses through here.

use crate::Result;
use async_trait::async_trait;

/// Async trait for the byte transport carrying one connection.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes over the transport.
    async fn send(&self, data: &[u8]) -> Result<()>;

    /// Close the transport.
    async fn close(&self) -> Result<()>;
}
