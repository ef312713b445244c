use std::path::PathBuf;

use clap::ValueEnum;
use keepass_host_frame::FrameConfig;

use crate::logging::{LogFormat, LogLevel};

/// Enables diagnostic logging when set to `1`.
pub const DEBUG_ENV: &str = "KEEPASS_HOST_DEBUG";
/// Overrides the log file location.
pub const LOG_FILE_ENV: &str = "KEEPASS_HOST_LOG_FILE";
/// Minimum log level: error, warn, info, debug, trace.
pub const LOG_LEVEL_ENV: &str = "KEEPASS_HOST_LOG_LEVEL";
/// Log line format: text or json.
pub const LOG_FORMAT_ENV: &str = "KEEPASS_HOST_LOG_FORMAT";
/// Overrides the maximum accepted request size in bytes.
pub const MAX_MESSAGE_ENV: &str = "KEEPASS_HOST_MAX_MESSAGE_BYTES";

const DEFAULT_LOG_FILE_NAME: &str = ".keepass-host.log";

/// Process configuration, read from the environment.
///
/// The browser launches the host with no way to pass flags, so every
/// setting comes from environment variables.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub debug: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    pub frame: FrameConfig,
    /// Problems found while reading the environment, reported once logging
    /// is up.
    pub warnings: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_file: None,
            log_level: LogLevel::Debug,
            log_format: LogFormat::Text,
            frame: FrameConfig::default(),
            warnings: Vec::new(),
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.debug = lookup(DEBUG_ENV).as_deref().is_some_and(is_truthy);
        config.log_file = lookup(LOG_FILE_ENV)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            match LogLevel::from_str(raw.trim(), true) {
                Ok(level) => config.log_level = level,
                Err(_) => config
                    .warnings
                    .push(format!("ignoring {LOG_LEVEL_ENV}={raw:?}: unknown level")),
            }
        }

        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            match LogFormat::from_str(raw.trim(), true) {
                Ok(format) => config.log_format = format,
                Err(_) => config
                    .warnings
                    .push(format!("ignoring {LOG_FORMAT_ENV}={raw:?}: unknown format")),
            }
        }

        if let Some(raw) = lookup(MAX_MESSAGE_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(max) if max > 0 => config.frame.max_inbound_payload = max,
                _ => config
                    .warnings
                    .push(format!("ignoring {MAX_MESSAGE_ENV}={raw:?}: expected a positive byte count")),
            }
        }

        config
    }

    /// Where diagnostic logs go: the override, else `~/.keepass-host.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(DEFAULT_LOG_FILE_NAME)))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> HostConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HostConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);

        assert!(!config.debug);
        assert_eq!(config.log_file, None);
        assert!(matches!(config.log_level, LogLevel::Debug));
        assert!(matches!(config.log_format, LogFormat::Text));
        assert_eq!(
            config.frame.max_inbound_payload,
            keepass_host_frame::DEFAULT_MAX_INBOUND_PAYLOAD
        );
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn debug_flag_values() {
        assert!(config_from(&[(DEBUG_ENV, "1")]).debug);
        assert!(config_from(&[(DEBUG_ENV, "true")]).debug);
        assert!(!config_from(&[(DEBUG_ENV, "0")]).debug);
        assert!(!config_from(&[(DEBUG_ENV, "")]).debug);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (DEBUG_ENV, "1"),
            (LOG_FILE_ENV, "/tmp/host.log"),
            (LOG_LEVEL_ENV, "WARN"),
            (LOG_FORMAT_ENV, "json"),
            (MAX_MESSAGE_ENV, "4096"),
        ]);

        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/host.log")));
        assert!(matches!(config.log_level, LogLevel::Warn));
        assert!(matches!(config.log_format, LogFormat::Json));
        assert_eq!(config.frame.max_inbound_payload, 4096);
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let config = config_from(&[
            (LOG_LEVEL_ENV, "loud"),
            (LOG_FORMAT_ENV, "xml"),
            (MAX_MESSAGE_ENV, "0"),
        ]);

        assert!(matches!(config.log_level, LogLevel::Debug));
        assert!(matches!(config.log_format, LogFormat::Text));
        assert_eq!(
            config.frame.max_inbound_payload,
            keepass_host_frame::DEFAULT_MAX_INBOUND_PAYLOAD
        );
        assert_eq!(config.warnings.len(), 3);
    }
}
