//! Outbound frame construction.
//!
//! Masking is asymmetric: server-to-client frames are never masked, while
//! client-to-server frames always are. Each direction has its own entry
//! point, so a masked server frame cannot be built at all.

use crate::error::FrameError;
use crate::frame::{
    apply_mask, Opcode, FIN_BIT, LEN16_MARKER, MASK_BIT, MASK_KEY_LEN, MAX_PAYLOAD_LEN,
};

/// Encode a single final server-to-client text frame. The mask bit is never
/// set. Payloads longer than the 16-bit length form can carry fail with
/// [`FrameError::UnsupportedPayloadSize`] instead of emitting a corrupt frame.
pub fn text_frame(payload: &str) -> crate::Result<Vec<u8>> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(4 + bytes.len());
    write_text_header(&mut out, bytes.len(), None)?;
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Encode a client-to-server text frame with a fresh random mask key.
pub fn masked_text_frame(payload: &str) -> crate::Result<Vec<u8>> {
    masked_text_frame_with_key(payload, rand::random())
}

/// Encode a client-to-server text frame with the given mask key.
pub fn masked_text_frame_with_key(
    payload: &str,
    key: [u8; MASK_KEY_LEN],
) -> crate::Result<Vec<u8>> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(4 + MASK_KEY_LEN + bytes.len());
    write_text_header(&mut out, bytes.len(), Some(key))?;
    let start = out.len();
    out.extend_from_slice(bytes);
    apply_mask(&mut out[start..], key);
    Ok(out)
}

/// Encode a bare close frame (no status code or reason).
pub fn close_frame() -> Vec<u8> {
    vec![FIN_BIT | u8::from(Opcode::Close), 0]
}

/// Write byte 0, the length field, and the mask key when present.
/// Lengths below 126 go in byte 1 directly; up to 65535 the sentinel goes in
/// byte 1 and the real length follows as a big-endian u16.
fn write_text_header(
    out: &mut Vec<u8>,
    len: usize,
    mask: Option<[u8; MASK_KEY_LEN]>,
) -> Result<(), FrameError> {
    let mask_bit = if mask.is_some() { MASK_BIT } else { 0 };
    out.push(FIN_BIT | u8::from(Opcode::Text));
    if len < LEN16_MARKER as usize {
        out.push(mask_bit | len as u8);
    } else if len <= MAX_PAYLOAD_LEN {
        out.push(mask_bit | LEN16_MARKER);
        out.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        return Err(FrameError::UnsupportedPayloadSize);
    }
    if let Some(key) = mask {
        out.extend_from_slice(&key);
    }
    Ok(())
}
