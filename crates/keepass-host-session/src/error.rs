use keepass_host_frame::FrameError;
use keepass_host_store::StoreError;

/// Message returned to the browser for any backend failure. The backend's
/// own error text stays in the process.
pub const BACKEND_FAULT_MESSAGE: &str = "credential store query failed";

/// Errors produced while serving requests.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// An inbound frame could not be decoded. Terminates the session.
    #[error("malformed frame: {0}")]
    Decode(#[source] FrameError),

    /// Reading the input stream failed. Terminates the session.
    #[error("failed to read request: {0}")]
    Read(#[source] FrameError),

    /// Writing the output stream failed. Terminates the session.
    #[error("failed to write response: {0}")]
    Write(#[source] FrameError),

    /// Missing or malformed handler input.
    #[error("{0}")]
    InvalidArgument(String),

    /// The credential store capability is missing.
    #[error("{0}")]
    Unavailable(String),

    /// The request named an action this host does not provide.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The credential store failed a query.
    #[error("{}", BACKEND_FAULT_MESSAGE)]
    BackendFault,

    /// A handler failed in a way none of the other variants describe.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`HostError`] for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    Read,
    Write,
    InvalidArgument,
    Unavailable,
    UnknownAction,
    BackendFault,
    Internal,
}

impl HostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostError::Decode(_) => ErrorKind::Decode,
            HostError::Read(_) => ErrorKind::Read,
            HostError::Write(_) => ErrorKind::Write,
            HostError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            HostError::Unavailable(_) => ErrorKind::Unavailable,
            HostError::UnknownAction(_) => ErrorKind::UnknownAction,
            HostError::BackendFault => ErrorKind::BackendFault,
            HostError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stream-level failures end the session; everything else becomes an
    /// error response.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            HostError::Decode(_) | HostError::Read(_) | HostError::Write(_)
        )
    }

    /// Classify a failure from the frame reader.
    pub fn from_read(err: FrameError) -> Self {
        if err.is_decode_error() {
            HostError::Decode(err)
        } else {
            HostError::Read(err)
        }
    }
}

impl From<StoreError> for HostError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable | StoreError::NotOpen => HostError::Unavailable(err.to_string()),
            other => {
                tracing::debug!(kind = other.kind(), "credential store failure");
                HostError::BackendFault
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_message_names_action() {
        let err = HostError::UnknownAction("does-not-exist".to_string());
        assert_eq!(err.to_string(), "Unknown action: does-not-exist");
        assert_eq!(err.kind(), ErrorKind::UnknownAction);
        assert!(!err.is_fatal());
    }

    #[test]
    fn backend_fault_hides_store_message() {
        let err = HostError::from(StoreError::Query("row 7: password=hunter2".to_string()));
        assert_eq!(err.kind(), ErrorKind::BackendFault);
        assert_eq!(err.to_string(), BACKEND_FAULT_MESSAGE);
    }

    #[test]
    fn missing_store_maps_to_unavailable() {
        let err = HostError::from(StoreError::NotOpen);
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(err.to_string(), "no credential store is open");
    }

    #[test]
    fn read_errors_split_decode_from_io() {
        let decode = HostError::from_read(FrameError::Truncated {
            expected: 10,
            received: 3,
        });
        assert_eq!(decode.kind(), ErrorKind::Decode);

        let io = HostError::from_read(FrameError::Io(std::io::Error::other("gone")));
        assert_eq!(io.kind(), ErrorKind::Read);
        assert!(decode.is_fatal() && io.is_fatal());
    }
}
