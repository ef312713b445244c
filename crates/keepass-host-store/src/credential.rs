use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One credential entry returned by a backend.
///
/// Serialized with the field names the browser extension expects: `uuid`
/// for the entry id and `password` for the secret.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Credential {
    /// Stable entry identifier.
    #[serde(rename = "uuid")]
    pub id: String,
    pub title: String,
    pub username: String,
    /// Secret material. Redacted in debug output and never logged.
    #[serde(rename = "password")]
    pub secret: String,
    pub url: String,
}

impl Credential {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            username: username.into(),
            secret: secret.into(),
            url: url.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field(
                "secret",
                &format_args!("<redacted:{} bytes>", self.secret.len()),
            )
            .field("url", &self.url)
            .finish()
    }
}

/// Snapshot of the backend's current store handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// A store handle is open.
    pub is_open: bool,
    /// Location of the open store, when known.
    pub path: Option<PathBuf>,
}

impl StoreStatus {
    /// No store open.
    pub fn closed() -> Self {
        Self::default()
    }

    /// A store open at `path`.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self {
            is_open: true,
            path: Some(path.into()),
        }
    }

    /// Whether a store is open and its location is known.
    pub fn is_loaded(&self) -> bool {
        self.is_open && self.path.is_some()
    }

    /// Final path component of the loaded store, or an empty string.
    pub fn database_name(&self) -> String {
        if !self.is_open {
            return String::new();
        }
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
