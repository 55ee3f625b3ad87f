//! Core data types for endpoint inspection and the synthesized contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Outcome of a single probe. Ephemeral, never retained in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Decoded JSON body. An empty object when nothing could be decoded.
    pub body: Value,
    /// Raw response text. Empty when the probe failed.
    pub raw: String,
    /// HTTP status code, or `0` when the probe failed.
    pub status: u16,
}

impl ProbeResult {
    /// The "no information gained" result.
    pub fn empty() -> Self {
        Self {
            body: Value::Object(Map::new()),
            raw: String::new(),
            status: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status == 0 && self.raw.is_empty()
    }
}

/// Workflow behavior detected for one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    /// Field whose value selects server-side workflow state, if any.
    pub controller: Option<String>,
    /// Literals the server echoed back. Unordered, deduplicated.
    pub discovered_states: BTreeSet<String>,
}

/// Everything learned about one endpoint path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub path: String,
    /// Field names in discovery order, no duplicates.
    pub fields: Vec<String>,
    /// Converged payload: field -> inferred literal.
    pub schema_template: Map<String, Value>,
    pub behavior: Behavior,
    /// Dotted key paths of the response to the converged payload.
    pub response_keys: Vec<String>,
}

impl EndpointRecord {
    /// Start an empty record for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// True when inspection learned nothing at all.
    ///
    /// Such a record is indistinguishable from an endpoint that takes no
    /// parameters; callers should read it as "inspection failed".
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.behavior.controller.is_none()
            && self.behavior.discovered_states.is_empty()
            && self.response_keys.is_empty()
    }
}

/// All endpoint records of one discovery run, keyed by path in inspection order.
pub type Registry = IndexMap<String, EndpointRecord>;

/// A workflow/auth endpoint entry of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLogic {
    pub endpoint: String,
    /// The controller field.
    pub parameter: String,
    pub actions: Vec<String>,
    /// Discovered fields minus the controller.
    pub required_inputs: Vec<String>,
}

/// A plain data endpoint entry of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLogic {
    pub endpoint: String,
    pub fields: Vec<String>,
}

/// Synthesized endpoint contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_logic: Option<AuthLogic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_logic: Option<DataLogic>,
}

/// Descriptor variant that keeps every endpoint, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedDescriptor {
    pub base_url: String,
    pub auth_logic: IndexMap<String, AuthLogic>,
    pub data_logic: IndexMap<String, DataLogic>,
}

/// Example request payload for one discovered action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub action: String,
    pub payload: Map<String, Value>,
}

/// Errors surfaced while setting up a discovery run.
///
/// Nothing that happens while probing is fatal; see [`crate::probe::ProbeError`].
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type ScoutResult<T> = Result<T, ScoutError>;
