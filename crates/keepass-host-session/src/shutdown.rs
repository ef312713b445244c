use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cross-thread stop signal for the session loop.
///
/// A signal handler calls [`request`](Self::request). The loop checks the
/// flag before each read and before each reply, and marks itself idle while
/// blocked waiting for input so the handler knows no reply is in flight.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
    idle: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// True while the loop is blocked reading the next request.
    pub fn is_idle(&self) -> bool {
        self.idle.load(Ordering::SeqCst)
    }

    pub(crate) fn set_idle(&self, idle: bool) {
        self.idle.store(idle, Ordering::SeqCst);
    }
}
