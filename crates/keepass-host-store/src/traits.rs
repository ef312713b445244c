use crate::credential::{Credential, StoreStatus};
use crate::error::{Result, StoreError};

/// The credential store collaborator consulted by action handlers.
///
/// Implementations own their store handle. Handlers only read through this
/// interface; opening and closing stores is the backend's business.
pub trait CredentialBackend: Send {
    /// Whether store support exists in this process at all.
    fn is_available(&self) -> bool;

    /// The state of the currently open store, if any.
    fn current_store(&self) -> StoreStatus;

    /// Entries whose URL matches `domain`.
    ///
    /// Returned credentials belong to the caller; backends must not keep
    /// copies for later calls.
    fn find_entries_by_domain(&self, domain: &str) -> Result<Vec<Credential>>;

    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Backend for processes without any credential store support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl CredentialBackend for UnavailableBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn current_store(&self) -> StoreStatus {
        StoreStatus::closed()
    }

    fn find_entries_by_domain(&self, _domain: &str) -> Result<Vec<Credential>> {
        Err(StoreError::Unavailable)
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
