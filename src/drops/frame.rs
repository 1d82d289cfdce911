//! Length-prefixed drop framing.
//!
//! Layout (little-endian):
//! - `i32` name length, then the UTF-8 name
//! - `i32` payload length, then the payload

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::DropConfig;
use crate::error::DropError;

const LEN_BYTES: usize = 4;

/// A named binary message exchanged with a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropMessage {
    pub name: String,
    pub payload: Bytes,
}

impl DropMessage {
    pub fn new(name: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        DropMessage {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Bytes this message occupies once framed.
    pub fn framed_len(&self) -> usize {
        2 * LEN_BYTES + self.name.len() + self.payload.len()
    }
}

/// Encodes and decodes frames, refusing lengths above the configured
/// ceilings before anything is buffered for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCodec {
    max_name_len: usize,
    max_payload_len: usize,
}

impl FrameCodec {
    pub fn new(max_name_len: usize, max_payload_len: usize) -> Self {
        FrameCodec {
            max_name_len,
            max_payload_len,
        }
    }

    pub fn from_config(config: &DropConfig) -> Self {
        Self::new(config.max_name_len, config.max_payload_len)
    }

    /// Appends the framed message to `dst`.
    pub fn encode(&self, message: &DropMessage, dst: &mut BytesMut) -> Result<(), DropError> {
        let name_len = self.check_name_len(message.name.len())?;
        let payload_len = self.check_payload_len(message.payload.len())?;

        dst.reserve(message.framed_len());
        dst.put_i32_le(name_len);
        dst.put_slice(message.name.as_bytes());
        dst.put_i32_le(payload_len);
        dst.put_slice(&message.payload);
        Ok(())
    }

    /// Takes one complete frame off the front of `src`.
    ///
    /// Returns `Ok(None)` and leaves `src` untouched while the frame is
    /// incomplete. Negative or oversized lengths are errors: the stream
    /// cannot be resynchronised after one.
    pub fn decode(&self, src: &mut BytesMut) -> Result<Option<DropMessage>, DropError> {
        if src.len() < LEN_BYTES {
            return Ok(None);
        }
        let name_len = read_len(&src[..LEN_BYTES], "name")?;
        if name_len > self.max_name_len {
            return Err(DropError::NameTooLong {
                len: name_len,
                max: self.max_name_len,
            });
        }

        let name_too_long = || DropError::NameTooLong {
            len: name_len,
            max: self.max_name_len,
        };
        let payload_at = LEN_BYTES.checked_add(name_len).ok_or_else(name_too_long)?;
        let payload_end = payload_at.checked_add(LEN_BYTES).ok_or_else(name_too_long)?;
        if src.len() < payload_end {
            return Ok(None);
        }
        let payload_len = read_len(&src[payload_at..payload_end], "payload")?;
        if payload_len > self.max_payload_len {
            return Err(DropError::PayloadTooLarge {
                len: payload_len,
                max: self.max_payload_len,
            });
        }

        let total = payload_end
            .checked_add(payload_len)
            .ok_or_else(|| DropError::PayloadTooLarge {
                len: payload_len,
                max: self.max_payload_len,
            })?;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        src.advance(LEN_BYTES);
        let name = src.split_to(name_len);
        src.advance(LEN_BYTES);
        let payload = src.split_to(payload_len).freeze();

        let name = String::from_utf8(name.to_vec()).map_err(|_| DropError::InvalidUtf8)?;
        Ok(Some(DropMessage { name, payload }))
    }

    fn check_name_len(&self, len: usize) -> Result<i32, DropError> {
        if len > self.max_name_len {
            return Err(DropError::NameTooLong {
                len,
                max: self.max_name_len,
            });
        }
        i32::try_from(len).map_err(|_| DropError::NameTooLong {
            len,
            max: self.max_name_len,
        })
    }

    fn check_payload_len(&self, len: usize) -> Result<i32, DropError> {
        if len > self.max_payload_len {
            return Err(DropError::PayloadTooLarge {
                len,
                max: self.max_payload_len,
            });
        }
        i32::try_from(len).map_err(|_| DropError::PayloadTooLarge {
            len,
            max: self.max_payload_len,
        })
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::from_config(&DropConfig::default())
    }
}

fn read_len(mut bytes: &[u8], field: &'static str) -> Result<usize, DropError> {
    let len = bytes.get_i32_le();
    usize::try_from(len).map_err(|_| DropError::NegativeLength { field, len })
}
