//! Routes requests to action handlers.
//!
//! Handlers take the session by shared reference and return typed results;
//! conversion to wire JSON happens once, in [`dispatch`].

use serde::Serialize;
use serde_json::Value;

use keepass_host_store::Credential;

use crate::action::Action;
use crate::envelope::Request;
use crate::error::{HostError, Result};
use crate::session::Session;

const BACKEND_AVAILABLE: &str = "Connection test successful";
const BACKEND_MISSING: &str = "Credential store backend not available";

#[derive(Debug, Serialize)]
struct ConnectionStatus {
    connected: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatus {
    is_open: bool,
    is_database_loaded: bool,
    database_name: String,
}

#[derive(Debug, Serialize)]
struct CredentialList {
    credentials: Vec<Credential>,
}

/// Run the handler named by `request` against `session`.
pub fn dispatch(session: &Session, request: &Request) -> Result<Value> {
    let name = request
        .action_name()
        .ok_or_else(|| HostError::InvalidArgument("request is missing 'action'".to_string()))?;
    let action: Action = name.parse()?;
    route(action, session, &request.data)
}

/// Run the handler for a known `action`.
pub fn route(action: Action, session: &Session, data: &Value) -> Result<Value> {
    match action {
        Action::TestConnection => to_payload(&test_connection(session)),
        Action::GetStatus => to_payload(&get_status(session)),
        Action::GetCredentials => to_payload(&get_credentials(session, data)?),
    }
}

fn test_connection(session: &Session) -> ConnectionStatus {
    let connected = session.backend().is_available();
    ConnectionStatus {
        connected,
        message: if connected {
            BACKEND_AVAILABLE
        } else {
            BACKEND_MISSING
        },
    }
}

fn get_status(session: &Session) -> SessionStatus {
    let status = session.store_status();
    SessionStatus {
        is_open: status.is_open,
        is_database_loaded: status.is_loaded(),
        database_name: status.database_name(),
    }
}

fn get_credentials(session: &Session, data: &Value) -> Result<CredentialList> {
    let domain = required_domain(data)?;

    let backend = session.backend();
    if !backend.is_available() {
        return Err(HostError::Unavailable(BACKEND_MISSING.to_string()));
    }

    tracing::debug!(domain, "fetching credentials");
    let credentials = backend.find_entries_by_domain(domain)?;
    tracing::debug!(matched = credentials.len(), "credentials fetched");

    Ok(CredentialList { credentials })
}

fn required_domain(data: &Value) -> Result<&str> {
    match data.get("domain") {
        Some(Value::String(domain)) if !domain.trim().is_empty() => Ok(domain.trim()),
        Some(Value::String(_)) | None | Some(Value::Null) => Err(HostError::InvalidArgument(
            "Domain not provided".to_string(),
        )),
        Some(_) => Err(HostError::InvalidArgument(
            "domain must be a string".to_string(),
        )),
    }
}

fn to_payload<T: Serialize>(result: &T) -> Result<Value> {
    serde_json::to_value(result).map_err(|err| HostError::Internal(err.to_string()))
}
