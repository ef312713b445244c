/// Errors reported by credential store backends.
///
/// Messages here may be logged but are never sent to the browser verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend capability is not present in this process.
    #[error("credential store backend not available")]
    Unavailable,

    /// The backend is available but no store is open.
    #[error("no credential store is open")]
    NotOpen,

    /// The store rejected or failed a query.
    #[error("credential store query failed: {0}")]
    Query(String),

    /// An I/O error occurred while accessing the store.
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Short, stable label safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Unavailable => "unavailable",
            StoreError::NotOpen => "not_open",
            StoreError::Query(_) => "query",
            StoreError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
