use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{HostError, Result};

/// A request decoded from one inbound frame.
///
/// Only the shape is checked here. `id` and `action` are kept as raw JSON so
/// they can be echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// Caller-chosen correlation token; `null` when absent.
    pub id: Value,
    /// Name of the requested operation; `null` when absent.
    pub action: Value,
    /// Handler input; an empty object when absent.
    pub data: Value,
}

impl Request {
    /// Build a request for `action` with no id and empty data.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            id: Value::Null,
            action: Value::String(action.into()),
            data: empty_data(),
        }
    }

    /// Set the correlation id.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the handler input.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = normalize_data(data);
        self
    }

    /// Extract a request from a decoded document.
    ///
    /// Fails with [`HostError::InvalidArgument`] when the document is not a
    /// JSON object.
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(mut fields) = document else {
            return Err(HostError::InvalidArgument(
                "request must be a JSON object".to_string(),
            ));
        };
        Ok(Self {
            id: fields.remove("id").unwrap_or(Value::Null),
            action: fields.remove("action").unwrap_or(Value::Null),
            data: normalize_data(fields.remove("data").unwrap_or(Value::Null)),
        })
    }

    /// The action name, when `action` is present and a string.
    pub fn action_name(&self) -> Option<&str> {
        self.action.as_str()
    }
}

fn empty_data() -> Value {
    Value::Object(Map::new())
}

fn normalize_data(data: Value) -> Value {
    if data.is_null() {
        empty_data()
    } else {
        data
    }
}

/// The reply to one request.
///
/// Exactly one of `data` and `error` is present, matching `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Value,
    pub action: Value,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A successful reply carrying `data`.
    pub fn success(request: &Request, data: Value) -> Self {
        Self {
            id: request.id.clone(),
            action: request.action.clone(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed reply correlated to `request`.
    pub fn failure(request: &Request, error: &HostError) -> Self {
        Self::failure_with(request.id.clone(), request.action.clone(), error.to_string())
    }

    /// A failed reply with explicit correlation fields.
    pub fn failure_with(id: Value, action: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            action,
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Re-issue this reply as a failure, keeping its correlation fields.
    pub fn into_failure(self, message: impl Into<String>) -> Self {
        Self::failure_with(self.id, self.action, message)
    }
}
