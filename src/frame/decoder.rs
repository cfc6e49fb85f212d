//! Inbound frame decoding.
//! Every read is bounds-checked against the supplied buffer; a frame that
//! declares more bytes than are present fails with [`FrameError::Truncated`].

use crate::error::{FrameError, PayloadError};
use crate::frame::{
    apply_mask, Inbound, Opcode, FIN_BIT, LEN16_MARKER, LEN64_MARKER, LEN_MASK, MASK_BIT,
    MASK_KEY_LEN, OPCODE_MASK,
};

/// Decode one complete inbound frame.
///
/// Close frames return [`Inbound::Closed`] without reading past the opcode.
/// Frames with any opcode other than text return [`Inbound::Ignored`].
/// The caller is expected to hand in exactly one full frame; reassembling
/// split TCP segments belongs to the transport layer.
pub fn decode(data: &[u8]) -> crate::Result<Inbound> {
    let mut d = Decoder::new(data);
    d.read_frame()
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn check_eos(&self, len: usize) -> Result<(), FrameError> {
        if self.pos + len <= self.data.len() {
            Ok(())
        } else {
            Err(FrameError::Truncated {
                needed: len,
                offset: self.pos,
                available: self.data.len() - self.pos,
            })
        }
    }

    fn read_u8(&mut self) -> Result<u8, FrameError> {
        self.check_eos(1)?;
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn read_u16_be(&mut self) -> Result<u16, FrameError> {
        self.check_eos(2)?;
        let b = &self.data[self.pos..self.pos + 2];
        self.pos += 2;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_mask_key(&mut self) -> Result<[u8; MASK_KEY_LEN], FrameError> {
        self.check_eos(MASK_KEY_LEN)?;
        let mut key = [0u8; MASK_KEY_LEN];
        key.copy_from_slice(&self.data[self.pos..self.pos + MASK_KEY_LEN]);
        self.pos += MASK_KEY_LEN;
        Ok(key)
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, FrameError> {
        self.check_eos(len)?;
        let out = self.data[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(out)
    }

    fn read_frame(&mut self) -> crate::Result<Inbound> {
        let first = self.read_u8()?;
        // Single-frame engine: a cleared FIN bit is observed but not enforced,
        // and the reserved bits are ignored.
        let is_final = first & FIN_BIT != 0;
        if !is_final {
            tracing::trace!("non-final frame treated as final");
        }

        match Opcode::from_u8(first & OPCODE_MASK) {
            Some(Opcode::Close) => return Ok(Inbound::Closed),
            Some(Opcode::Text) => {}
            _ => return Ok(Inbound::Ignored),
        }

        let second = self.read_u8()?;
        let masked = second & MASK_BIT != 0;
        let len = self.read_payload_len(second & LEN_MASK)?;

        let payload = if masked {
            let key = self.read_mask_key()?;
            let mut buf = self.read_bytes(len)?;
            apply_mask(&mut buf, key);
            buf
        } else {
            self.read_bytes(len)?
        };

        let text = String::from_utf8(payload).map_err(PayloadError::from)?;
        Ok(Inbound::Text(text))
    }

    fn read_payload_len(&mut self, initial: u8) -> crate::Result<usize> {
        match initial {
            LEN64_MARKER => Err(FrameError::UnsupportedPayloadSize.into()),
            LEN16_MARKER => Ok(self.read_u16_be()? as usize),
            n => Ok(n as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Hand-build a masked client text frame with a short length field.
    fn client_text_frame(payload: &[u8], key: [u8; 4]) -> Vec<u8> {
        assert!(payload.len() < 126);
        let mut frame = vec![0x81, MASK_BIT | payload.len() as u8];
        frame.extend_from_slice(&key);
        let mut masked = payload.to_vec();
        apply_mask(&mut masked, key);
        frame.extend_from_slice(&masked);
        frame
    }

    #[test]
    fn decodes_masked_text_frame() {
        let frame = client_text_frame(b"hello", [0xA1, 0xB2, 0xC3, 0xD4]);
        let decoded = decode(&frame).unwrap();
        assert_eq!(decoded, Inbound::Text("hello".to_string()));
    }

    #[test]
    fn decodes_unmasked_text_frame() {
        let mut frame = vec![0x81, 5];
        frame.extend_from_slice(b"hello");
        assert_eq!(decode(&frame).unwrap(), Inbound::Text("hello".to_string()));
    }

    #[test]
    fn decodes_empty_text_frame() {
        assert_eq!(decode(&[0x81, 0x00]).unwrap(), Inbound::Text(String::new()));
    }

    #[test]
    fn close_opcode_reads_nothing_further() {
        // Any bytes after the opcode are irrelevant, including none at all.
        assert_eq!(decode(&[0x88]).unwrap(), Inbound::Closed);
        assert_eq!(decode(&[0x88, 0x00]).unwrap(), Inbound::Closed);
        assert_eq!(decode(&[0x88, 0xFF, 0x01, 0x02]).unwrap(), Inbound::Closed);
    }

    #[test]
    fn non_text_opcodes_are_ignored() {
        for first in [0x80u8, 0x82, 0x89, 0x8A, 0x83, 0x8F] {
            // continuation, binary, ping, pong, and two unknown nibbles
            assert_eq!(decode(&[first, 0x00]).unwrap(), Inbound::Ignored);
        }
    }

    #[test]
    fn non_final_text_frame_is_still_decoded() {
        let mut frame = vec![0x01, 2];
        frame.extend_from_slice(b"hi");
        assert_eq!(decode(&frame).unwrap(), Inbound::Text("hi".to_string()));
    }

    #[test]
    fn extended_length_uses_next_two_bytes() {
        let payload = vec![b'x'; 300];
        let mut frame = vec![0x81, LEN16_MARKER];
        frame.extend_from_slice(&300u16.to_be_bytes());
        frame.extend_from_slice(&payload);
        match decode(&frame).unwrap() {
            Inbound::Text(text) => assert_eq!(text.len(), 300),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn sixty_four_bit_length_is_rejected_unread() {
        // Marker 127 followed by 8 length bytes the decoder must not touch.
        let mut frame = vec![0x81, LEN64_MARKER];
        frame.extend_from_slice(&[0u8; 8]);
        let err = decode(&frame).unwrap_err();
        assert!(matches!(
            err,
            Error::Frame(FrameError::UnsupportedPayloadSize)
        ));
        // Even with no length bytes at all the marker itself is the error.
        let err = decode(&[0x81, LEN64_MARKER]).unwrap_err();
        assert!(matches!(
            err,
            Error::Frame(FrameError::UnsupportedPayloadSize)
        ));
    }

    #[test]
    fn truncated_at_every_field_boundary() {
        let cases: &[&[u8]] = &[
            &[],                                // no opcode byte
            &[0x81],                            // no length byte
            &[0x81, LEN16_MARKER],              // missing extended length
            &[0x81, LEN16_MARKER, 0x01],        // half the extended length
            &[0x81, MASK_BIT | 5],              // missing mask key
            &[0x81, MASK_BIT | 5, 1, 2, 3],     // partial mask key
            &[0x81, MASK_BIT | 5, 1, 2, 3, 4],  // key but no payload
            &[0x81, 5, b'h', b'i'],             // unmasked payload short
        ];
        for case in cases {
            let err = decode(case).unwrap_err();
            assert!(
                matches!(err, Error::Frame(FrameError::Truncated { .. })),
                "case {case:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn declared_length_larger_than_buffer_is_truncated() {
        let frame = vec![0x81, 125, b'a', b'b'];
        let err = decode(&frame).unwrap_err();
        assert!(matches!(
            err,
            Error::Frame(FrameError::Truncated {
                needed: 125,
                offset: 2,
                available: 2
            })
        ));
    }

    #[test]
    fn invalid_utf8_payload_is_malformed() {
        let frame = vec![0x81, 2, 0xFF, 0xFE];
        let err = decode(&frame).unwrap_err();
        assert!(matches!(err, Error::Payload(PayloadError::Utf8(_))));
    }

    #[test]
    fn masked_json_hello_from_the_client() {
        let payload = br#"{"message":"Hello from the client!"}"#;
        let frame = client_text_frame(payload, [0x12, 0x34, 0x56, 0x78]);
        match decode(&frame).unwrap() {
            Inbound::Text(text) => {
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                assert_eq!(value["message"], "Hello from the client!");
            }
            other => panic!("expected text, got {other:?}"),
        }
    }
}
