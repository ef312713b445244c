use std::path::PathBuf;

use crate::credential::{Credential, StoreStatus};
use crate::error::{Result, StoreError};
use crate::traits::CredentialBackend;

/// In-process credential backend.
///
/// Holds entries in memory behind an optional store path. Useful for
/// embedding the host and for exercising handlers without a real vault.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    path: Option<PathBuf>,
    entries: Vec<Credential>,
}

impl MemoryBackend {
    /// An available backend with no store open.
    pub fn new() -> Self {
        Self::default()
    }

    /// An available backend with a store already open at `path`.
    pub fn opened(path: impl Into<PathBuf>, entries: Vec<Credential>) -> Self {
        Self {
            path: Some(path.into()),
            entries,
        }
    }

    /// Open a store at `path` holding `entries`, replacing any open store.
    pub fn open(&mut self, path: impl Into<PathBuf>, entries: Vec<Credential>) {
        self.path = Some(path.into());
        self.entries = entries;
    }

    /// Close the current store and drop its entries.
    pub fn close(&mut self) {
        self.path = None;
        self.entries.clear();
    }

    /// Number of entries in the open store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialBackend for MemoryBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn current_store(&self) -> StoreStatus {
        match &self.path {
            Some(path) => StoreStatus::open_at(path.clone()),
            None => StoreStatus::closed(),
        }
    }

    fn find_entries_by_domain(&self, domain: &str) -> Result<Vec<Credential>> {
        if self.path.is_none() {
            return Err(StoreError::NotOpen);
        }
        let matches: Vec<Credential> = self
            .entries
            .iter()
            .filter(|entry| url_matches_domain(&entry.url, domain))
            .cloned()
            .collect();
        tracing::debug!(matched = matches.len(), "memory store queried");
        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Case-insensitive literal substring match of `domain` against `url`.
///
/// Empty URLs and empty domains never match.
pub fn url_matches_domain(url: &str, domain: &str) -> bool {
    let domain = domain.trim();
    if url.is_empty() || domain.is_empty() {
        return false;
    }
    url.to_lowercase().contains(&domain.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> MemoryBackend {
        MemoryBackend::opened(
            "/vaults/work.kdbx",
            vec![
                Credential::new("1", "Mail", "alice", "s1", "https://mail.Example.com/login"),
                Credential::new("2", "Wiki", "bob", "s2", "https://wiki.example.org"),
                Credential::new("3", "Note", "carol", "s3", ""),
            ],
        )
    }

    #[test]
    fn finds_entries_by_substring() {
        let found = vault().find_entries_by_domain("example.com").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn match_is_case_insensitive() {
        let found = vault().find_entries_by_domain("EXAMPLE").unwrap();
        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn domain_is_literal_not_pattern() {
        assert!(!url_matches_domain("https://exampleXcom", "example.com"));
        assert!(url_matches_domain("https://example.com", "example.com"));
    }

    #[test]
    fn empty_url_never_matches() {
        assert!(!url_matches_domain("", "example.com"));
        assert!(!url_matches_domain("https://example.com", "  "));
    }

    #[test]
    fn closed_store_is_not_queryable() {
        let backend = MemoryBackend::new();
        assert!(backend.is_available());
        assert!(!backend.current_store().is_open);
        assert!(matches!(
            backend.find_entries_by_domain("example.com"),
            Err(StoreError::NotOpen)
        ));
    }

    #[test]
    fn open_and_close_track_status() {
        let mut backend = MemoryBackend::new();
        backend.open("/tmp/db.kdbx", vec![Credential::new("1", "t", "u", "p", "x.io")]);
        assert_eq!(backend.current_store().database_name(), "db.kdbx");
        assert_eq!(backend.len(), 1);

        backend.close();
        assert!(backend.is_empty());
        assert_eq!(backend.current_store(), StoreStatus::closed());
    }
}
