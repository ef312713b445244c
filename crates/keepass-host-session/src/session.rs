use std::fmt;

use keepass_host_store::{CredentialBackend, StoreStatus, UnavailableBackend};

/// Process-lifetime state threaded through every dispatch.
///
/// Owned by the [`Host`](crate::Host) loop. Holds the one credential
/// backend handle this process uses and the browser-supplied caller origin.
pub struct Session {
    backend: Box<dyn CredentialBackend>,
    caller: Option<String>,
}

impl Session {
    /// Create a session around `backend`.
    pub fn new(backend: impl CredentialBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            caller: None,
        }
    }

    /// Record the origin of the extension that launched this process.
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn backend(&self) -> &dyn CredentialBackend {
        self.backend.as_ref()
    }

    /// Origin of the calling extension, if the browser provided one.
    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    /// Current state of the backend's store handle.
    pub fn store_status(&self) -> StoreStatus {
        self.backend.current_store()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(UnavailableBackend)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.backend.name())
            .field("caller", &self.caller)
            .finish()
    }
}
