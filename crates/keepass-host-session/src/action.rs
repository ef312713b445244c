use std::fmt;
use std::str::FromStr;

use crate::error::HostError;

/// Operations the host provides to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Report whether a credential store backend is present.
    TestConnection,
    /// Look up credentials for a domain.
    GetCredentials,
    /// Report the state of the open store.
    GetStatus,
}

impl Action {
    /// Every supported action.
    pub const ALL: [Action; 3] = [
        Action::TestConnection,
        Action::GetCredentials,
        Action::GetStatus,
    ];

    /// Wire name used in the `action` field.
    pub fn name(self) -> &'static str {
        match self {
            Action::TestConnection => "test-connection",
            Action::GetCredentials => "get-credentials",
            Action::GetStatus => "get-status",
        }
    }
}

impl FromStr for Action {
    type Err = HostError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| HostError::UnknownAction(name.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
