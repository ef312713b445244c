//! Credential store backend interface.
//!
//! The native messaging host never touches a secrets database directly.
//! Action handlers talk to a [`CredentialBackend`], which owns whatever
//! handle the real store needs. Two backends ship in-tree:
//!
//! - [`UnavailableBackend`]: no store support compiled in or configured
//! - [`MemoryBackend`]: entries held in process memory

pub mod credential;
pub mod error;
pub mod memory;
pub mod traits;

pub use credential::{Credential, StoreStatus};
pub use error::{Result, StoreError};
pub use memory::{url_matches_domain, MemoryBackend};
pub use traits::{CredentialBackend, UnavailableBackend};
