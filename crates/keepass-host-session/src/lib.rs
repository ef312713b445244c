//! Request handling for the KeePass native messaging host.
//!
//! The browser sends one framed JSON request at a time; the [`Host`] loop
//! decodes it into a [`Request`], routes it to an [`Action`] handler against
//! the process [`Session`], and writes back exactly one [`Response`].

pub mod action;
pub mod envelope;
pub mod error;
pub mod host;
pub mod router;
pub mod session;
pub mod shutdown;

pub use action::Action;
pub use envelope::{Request, Response};
pub use error::{ErrorKind, HostError, Result};
pub use host::{Host, HostState, SessionSummary, StopReason};
pub use router::dispatch;
pub use session::Session;
pub use shutdown::Shutdown;
