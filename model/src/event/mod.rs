use std::collections::HashMap;

use serde::Serialize;

use crate::authorizer::AuthorizerResult;

/// API Gateway "Lambda proxy integration" request event.
///
/// Every field is serialized, nulls included, so the JSON matches what the gateway sends.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub body: Option<String>,
    pub headers: HashMap<String, String>,
    pub http_method: String,
    pub is_base64_encoded: bool,
    pub multi_value_headers: Option<HashMap<String, Vec<String>>>,
    pub multi_value_query_string_parameters: HashMap<String, Vec<String>>,
    pub path: String,
    pub path_parameters: Option<HashMap<String, String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub request_context: RequestContext,
    pub resource: String,
    pub stage_variables: Option<HashMap<String, String>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub account_id: String,
    pub api_id: String,
    pub authorizer: AuthorizerResult,
    pub domain_name: String,
    pub domain_prefix: String,
    pub extended_request_id: String,
    pub http_method: String,
    pub identity: Identity,
    pub path: String,
    pub protocol: String,
    pub request_id: String,
    pub request_time: String,
    pub request_time_epoch: i64,
    pub resource_id: String,
    pub resource_path: String,
    pub stage: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub access_key: Option<String>,
    pub account_id: String,
    pub api_key: String,
    pub api_key_id: String,
    pub caller: String,
    pub cognito_authentication_provider: String,
    pub cognito_authentication_type: String,
    pub cognito_identity_id: String,
    pub cognito_identity_pool_id: String,
    pub principal_org_id: Option<String>,
    pub source_ip: String,
    pub user: String,
    pub user_agent: String,
    pub user_arn: String,
}
