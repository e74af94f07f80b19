use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per request stage information supplied by the emulator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StageContext {
    pub stage: String,

    /// Request path as it is reported to the function.
    pub path: String,

    #[serde(default)]
    pub stage_variables: Option<HashMap<String, String>>,

    /// Explicit route key (`GET /users`). When present it is used verbatim as the resource.
    #[serde(default)]
    pub route_key: Option<String>,
}
