//! KeePass native messaging host.
//!
//! A browser launches this process on demand and talks to it over
//! stdin/stdout using length-prefixed JSON frames.
//!
//! # Crate Structure
//!
//! - [`frame`]: length-prefixed message framing
//! - [`store`]: credential store backend interface
//! - [`session`]: request envelopes, action routing and the session loop

/// Re-export frame types.
pub mod frame {
    pub use keepass_host_frame::*;
}

/// Re-export credential store types.
pub mod store {
    pub use keepass_host_store::*;
}

/// Re-export session types.
pub mod session {
    pub use keepass_host_session::*;
}
