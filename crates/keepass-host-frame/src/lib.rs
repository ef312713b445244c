//! Length-prefixed framing for browser native messaging.
//!
//! Every message on the wire is:
//! - A 4-byte little-endian payload length
//! - Exactly that many bytes of UTF-8 encoded JSON
//!
//! There is no magic number and no delimiter. Once a frame is malformed the
//! stream cannot be resynchronised, so decode failures are terminal for the
//! caller.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_INBOUND_PAYLOAD,
    DEFAULT_MAX_OUTBOUND_PAYLOAD, HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
