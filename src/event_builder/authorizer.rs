use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use model::authorizer::{AuthorizerResult, SynthesizedAuthorizer};
use model::raw_request::AuthCredentials;
use serde_json::Value;

use super::headers::{NormalizedHeaders, AUTHORIZATION_HEADERS};
use crate::config::{non_empty, Config};
use crate::result::error::{AuthorizerError, TokenError};

/// Request header whose JSON value replaces the authorizer result.
pub const AUTHORIZER_OVERRIDE_HEADER: &str = "sls-offline-authorizer-override";

pub const DEFAULT_PRINCIPAL_ID: &str = "offlineContext_authorizer_principalId";

const BEARER_SCHEME: &str = "Bearer";

// Token segments are base64url, with or without padding.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Receives the malformed-override errors of a build. Without one they go to `tracing`.
#[cfg_attr(test, mockall::automock)]
pub trait AuthorizerLogger: Send + Sync {
    fn error(&self, message: &str);
}

fn report(logger: Option<&dyn AuthorizerLogger>, error: &AuthorizerError) {
    match logger {
        Some(logger) => logger.error(&error.to_string()),
        None => tracing::error!(error = ?error, "{}", error),
    }
}

fn environment_override(
    state: AuthorizerResult,
    config: &Config,
    logger: Option<&dyn AuthorizerLogger>,
) -> AuthorizerResult {
    let Some(raw) = non_empty(&config.authorizer) else {
        return state;
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => state.overridden_by(value),
        Err(e) => {
            report(logger, &AuthorizerError::MalformedEnvironmentOverride(e));
            state
        }
    }
}

// A malformed header leaves the previous state untouched, including an environment override.
fn header_override(
    state: AuthorizerResult,
    headers: &NormalizedHeaders,
    logger: Option<&dyn AuthorizerLogger>,
) -> AuthorizerResult {
    let Some(raw) = headers
        .get_ignore_case(AUTHORIZER_OVERRIDE_HEADER)
        .filter(|raw| !raw.is_empty())
    else {
        return state;
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => state.overridden_by(value),
        Err(source) => {
            report(
                logger,
                &AuthorizerError::MalformedHeaderOverride {
                    header: AUTHORIZER_OVERRIDE_HEADER,
                    source,
                },
            );
            state
        }
    }
}

/// Token carried by the `Authorization` header. With the `Bearer` scheme the token is what
/// follows it, any other value is taken as the token itself.
pub(crate) fn bearer_token(headers: &NormalizedHeaders) -> Option<&str> {
    let value = headers.get_first_of(&AUTHORIZATION_HEADERS)?;

    match value.split_once(' ') {
        Some((BEARER_SCHEME, token)) => Some(token).filter(|token| !token.is_empty()),
        _ if value == BEARER_SCHEME => None,
        _ => Some(value),
    }
}

/// Reads the payload segment of a JWT. The signature is not verified.
pub(crate) fn decode_claims(token: &str) -> Result<Value, TokenError> {
    let payload = token.split('.').nth(1).ok_or(TokenError::MissingPayload)?;
    let bytes = TOKEN_ENGINE.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn scopes_of(claims: &Value) -> Option<Vec<String>> {
    claims
        .get("scope")
        .and_then(Value::as_str)
        .filter(|scope| !scope.is_empty())
        .map(|scope| scope.split(' ').map(str::to_owned).collect())
}

fn principal_id(config: &Config, credentials: Option<&AuthCredentials>) -> String {
    credentials
        .and_then(|credentials| credentials.principal_id.as_deref())
        .filter(|principal_id| !principal_id.is_empty())
        .or_else(|| non_empty(&config.principal_id))
        .unwrap_or(DEFAULT_PRINCIPAL_ID)
        .to_owned()
}

/// Resolves `requestContext.authorizer`: environment override, then header override, then a
/// record synthesized from the request credentials and the bearer token claims.
pub(crate) fn resolve(
    config: &Config,
    headers: &NormalizedHeaders,
    credentials: Option<&AuthCredentials>,
    logger: Option<&dyn AuthorizerLogger>,
) -> AuthorizerResult {
    let state = environment_override(AuthorizerResult::Unset, config, logger);
    let state = header_override(state, headers, logger);

    state.or_synthesize(|| {
        // Undecodable tokens simply produce no claims.
        let claims = bearer_token(headers).and_then(|token| decode_claims(token).ok());
        let scopes = claims.as_ref().and_then(scopes_of);

        SynthesizedAuthorizer {
            context: credentials
                .and_then(|credentials| credentials.context.clone())
                .unwrap_or_default(),
            claims,
            scopes,
            principal_id: principal_id(config, credentials),
        }
    })
}
