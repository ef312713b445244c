use std::fmt;

use keepass_host_session::{HostError, StopReason};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const INTERNAL: i32 = 125;
pub const INTERRUPTED: i32 = 130;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Exit code for a session that stopped normally.
pub fn stop_code(reason: StopReason) -> i32 {
    match reason {
        StopReason::EndOfStream => SUCCESS,
        StopReason::DecodeFailure => DATA_INVALID,
        StopReason::Interrupted => INTERRUPTED,
    }
}

pub fn host_error(context: &str, err: HostError) -> CliError {
    let code = match err {
        HostError::Decode(_) => DATA_INVALID,
        HostError::Read(_) | HostError::Write(_) => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}
