use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::de::DeserializeOwned;

use crate::error::{FrameError, Result};

/// Frame header: payload length (4) = 4 bytes.
pub const HEADER_SIZE: usize = 4;

/// Default maximum inbound payload size: 64 MiB, the largest message a
/// browser will deliver to a native host.
pub const DEFAULT_MAX_INBOUND_PAYLOAD: usize = 64 * 1024 * 1024;

/// Default maximum outbound payload size: 1 MiB, the largest message a
/// browser will accept from a native host.
pub const DEFAULT_MAX_OUTBOUND_PAYLOAD: usize = 1024 * 1024;

/// A single length-delimited message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The message payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Borrow the payload as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.payload)?)
    }

    /// Decode the payload as UTF-8 JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(self.text()?)?)
    }
}

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬─────────────────────┐
/// │ Length       │ Payload             │
/// │ (4B LE)      │ (Length bytes JSON) │
/// └──────────────┴─────────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: u32::MAX as usize,
    })?;
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32_le(len);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes exactly the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    let Some(payload_len) = peek_length(src) else {
        return Ok(None); // Need more data
    };

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(Frame { payload }))
}

/// Read the declared payload length without consuming anything.
pub(crate) fn peek_length(src: &[u8]) -> Option<usize> {
    let header: [u8; HEADER_SIZE] = src.get(..HEADER_SIZE)?.try_into().ok()?;
    Some(u32::from_le_bytes(header) as usize)
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum accepted payload size for frames read from the browser.
    pub max_inbound_payload: usize,
    /// Maximum payload size for frames written to the browser.
    pub max_outbound_payload: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_inbound_payload: DEFAULT_MAX_INBOUND_PAYLOAD,
            max_outbound_payload: DEFAULT_MAX_OUTBOUND_PAYLOAD,
        }
    }
}
