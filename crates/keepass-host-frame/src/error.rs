/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The stream ended part-way through a frame.
    #[error("truncated frame (expected {expected} bytes, received {received})")]
    Truncated { expected: usize, received: usize },

    /// The payload is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The payload is not a valid JSON document.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output stream accepted zero bytes.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True for failures in the content of an inbound frame, as opposed to
    /// failures of the underlying stream.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            FrameError::PayloadTooLarge { .. }
                | FrameError::Truncated { .. }
                | FrameError::InvalidUtf8(_)
                | FrameError::InvalidJson(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
