//! Errors raised while building a proxy event. None of them abort the build: they are either
//! logged or dropped, and the event falls back to the next authorizer source.

/// An authorizer override that is not valid JSON.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizerError {
    #[error("Could not parse env AUTHORIZER, make sure it is correct JSON: {0}")]
    MalformedEnvironmentOverride(#[source] serde_json::Error),

    #[error("Could not parse header {header}, make sure it is correct JSON: {source}")]
    MalformedHeaderOverride {
        header: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A bearer token whose claims could not be read.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,

    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}
