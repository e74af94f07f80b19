use chrono::{DateTime, TimeZone, Utc};
use model::authorizer::AuthorizerResult;
use model::event::{Identity, RequestContext};
use model::raw_request::RawRequest;
use model::stage::StageContext;

use super::headers::NormalizedHeaders;
use crate::config::{non_empty, Config};
use crate::ids::IdGenerator;

pub const PROTOCOL: &str = "HTTP/1.1";

pub const ACCOUNT_ID: &str = "offlineContext_accountId";
pub const API_ID: &str = "offlineContext_apiId";
pub const DOMAIN_NAME: &str = "offlineContext_domainName";
pub const DOMAIN_PREFIX: &str = "offlineContext_domainPrefix";
pub const RESOURCE_ID: &str = "offlineContext_resourceId";

pub const IDENTITY_API_KEY: &str = "offlineContext_apiKey";
pub const IDENTITY_API_KEY_ID: &str = "offlineContext_apiKeyId";
pub const IDENTITY_CALLER: &str = "offlineContext_caller";
pub const IDENTITY_COGNITO_AUTHENTICATION_PROVIDER: &str =
    "offlineContext_cognitoAuthenticationProvider";
pub const IDENTITY_COGNITO_AUTHENTICATION_TYPE: &str = "offlineContext_cognitoAuthenticationType";
pub const IDENTITY_COGNITO_IDENTITY_ID: &str = "offlineContext_cognitoIdentityId";
pub const IDENTITY_COGNITO_IDENTITY_POOL_ID: &str = "offlineContext_cognitoIdentityPoolId";
pub const IDENTITY_USER: &str = "offlineContext_user";
pub const IDENTITY_USER_ARN: &str = "offlineContext_userArn";

const COGNITO_AUTHENTICATION_PROVIDER_HEADER: &str = "cognito-authentication-provider";
const COGNITO_IDENTITY_ID_HEADER: &str = "cognito-identity-id";
const USER_AGENT_HEADER: &str = "user-agent";

/// Common log format, always rendered in UTC.
const CLF_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// The explicit route key when there is one, otherwise the route path without its
/// `/<stage>` prefix.
pub(crate) fn resource(route_path: &str, stage: &StageContext) -> String {
    match &stage.route_key {
        Some(route_key) => route_key.clone(),
        None => route_path.replacen(&format!("/{}", stage.stage), "", 1),
    }
}

pub(crate) fn request_time(received_millis: i64) -> String {
    let received: DateTime<Utc> = Utc
        .timestamp_millis_opt(received_millis)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::from(std::time::UNIX_EPOCH));

    received.format(CLF_TIME_FORMAT).to_string()
}

fn override_or(value: &Option<String>, placeholder: &str) -> String {
    non_empty(value).unwrap_or(placeholder).to_owned()
}

fn header_or_override_or(
    headers: &NormalizedHeaders,
    header: &str,
    value: &Option<String>,
    placeholder: &str,
) -> String {
    headers
        .get_ignore_case(header)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| override_or(value, placeholder))
}

pub(crate) fn identity(config: &Config, headers: &NormalizedHeaders, request: &RawRequest) -> Identity {
    Identity {
        access_key: None,
        account_id: override_or(&config.sls_account_id, ACCOUNT_ID),
        api_key: override_or(&config.sls_api_key, IDENTITY_API_KEY),
        api_key_id: override_or(&config.sls_api_key_id, IDENTITY_API_KEY_ID),
        caller: override_or(&config.sls_caller, IDENTITY_CALLER),
        cognito_authentication_provider: header_or_override_or(
            headers,
            COGNITO_AUTHENTICATION_PROVIDER_HEADER,
            &config.sls_cognito_authentication_provider,
            IDENTITY_COGNITO_AUTHENTICATION_PROVIDER,
        ),
        cognito_authentication_type: override_or(
            &config.sls_cognito_authentication_type,
            IDENTITY_COGNITO_AUTHENTICATION_TYPE,
        ),
        cognito_identity_id: header_or_override_or(
            headers,
            COGNITO_IDENTITY_ID_HEADER,
            &config.sls_cognito_identity_id,
            IDENTITY_COGNITO_IDENTITY_ID,
        ),
        cognito_identity_pool_id: override_or(
            &config.sls_cognito_identity_pool_id,
            IDENTITY_COGNITO_IDENTITY_POOL_ID,
        ),
        principal_org_id: None,
        source_ip: request.info.remote_address.clone(),
        user: IDENTITY_USER.to_owned(),
        user_agent: headers
            .get_ignore_case(USER_AGENT_HEADER)
            .unwrap_or_default()
            .to_owned(),
        user_arn: IDENTITY_USER_ARN.to_owned(),
    }
}

pub(crate) struct ContextInput<'a> {
    pub config: &'a Config,
    pub id_generator: &'a dyn IdGenerator,
    pub headers: &'a NormalizedHeaders,
    pub request: &'a RawRequest,
    pub stage: &'a StageContext,
    pub http_method: &'a str,
    pub authorizer: AuthorizerResult,
}

pub(crate) fn request_context(input: ContextInput<'_>) -> RequestContext {
    let ContextInput {
        config,
        id_generator,
        headers,
        request,
        stage,
        http_method,
        authorizer,
    } = input;

    RequestContext {
        account_id: ACCOUNT_ID.to_owned(),
        api_id: API_ID.to_owned(),
        authorizer,
        domain_name: DOMAIN_NAME.to_owned(),
        domain_prefix: DOMAIN_PREFIX.to_owned(),
        extended_request_id: id_generator.next_id(),
        http_method: http_method.to_owned(),
        identity: identity(config, headers, request),
        path: stage.path.clone(),
        protocol: PROTOCOL.to_owned(),
        request_id: id_generator.next_id(),
        request_time: request_time(request.info.received),
        request_time_epoch: request.info.received,
        resource_id: RESOURCE_ID.to_owned(),
        resource_path: request.route.path.clone(),
        stage: stage.stage.clone(),
    }
}
