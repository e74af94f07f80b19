use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request as captured by the local HTTP layer, before it is turned into a proxy event.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    pub method: String,

    /// Request target as received, e.g. `/dev/users?limit=10`. Absolute URLs are accepted too.
    pub url: String,

    /// Header lines in the order they were received, with the case the client used.
    #[serde(default)]
    pub raw_headers: Vec<RawHeader>,

    /// Payload after the HTTP layer parsed it.
    #[serde(default)]
    pub payload: Option<Payload>,

    /// Payload bytes before any parsing happened.
    #[serde(default)]
    pub raw_payload: Option<Vec<u8>>,

    /// Path parameters resolved by the route matcher.
    #[serde(default)]
    pub params: HashMap<String, String>,

    pub route: Route,

    #[serde(default)]
    pub auth: Option<AuthCredentials>,

    pub info: ConnectionInfo,
}

/// A single `name: value` header line.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RawHeader(pub String, pub String);

impl RawHeader {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self(name.into(), value.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

/// The payload the HTTP layer handed over. Text payloads are kept verbatim, anything the
/// layer decoded (JSON documents, forms) arrives as `Parsed`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Parsed(Value),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    /// Declared route path, including the stage prefix (`/dev/users/{id}`).
    pub path: String,
}

/// Credentials attached to the request by an upstream (emulated) authorizer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthCredentials {
    #[serde(default)]
    pub principal_id: Option<String>,

    #[serde(default)]
    pub context: Option<Map<String, Value>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// Arrival time in milliseconds since the unix epoch.
    pub received: i64,
    pub remote_address: String,
}
