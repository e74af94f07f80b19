use model::raw_request::{ConnectionInfo, Payload, RawHeader, RawRequest, Route};
use model::stage::StageContext;

use super::constants::{
    RECEIVED_TIMESTAMP_FOR_MOCK_REQUESTS, REMOTE_ADDRESS_FOR_MOCK_REQUESTS,
    STAGE_FOR_MOCK_REQUESTS,
};

/// Builds a request for `route_path` with no headers, no body and no credentials.
/// The query string, if any, is taken from `url`.
pub fn build_raw_request(method: &str, url: &str, route_path: &str) -> RawRequest {
    RawRequest {
        method: method.to_owned(),
        url: url.to_owned(),
        route: Route {
            path: route_path.to_owned(),
        },
        info: ConnectionInfo {
            received: RECEIVED_TIMESTAMP_FOR_MOCK_REQUESTS,
            remote_address: REMOTE_ADDRESS_FOR_MOCK_REQUESTS.to_owned(),
        },
        ..RawRequest::default()
    }
}

pub fn with_headers(mut request: RawRequest, headers: &[(&str, &str)]) -> RawRequest {
    request
        .raw_headers
        .extend(headers.iter().map(|(name, value)| RawHeader::new(*name, *value)));
    request
}

pub fn with_text_body(mut request: RawRequest, body: &str) -> RawRequest {
    request.payload = Some(Payload::Text(body.to_owned()));
    request.raw_payload = Some(body.as_bytes().to_vec());
    request
}

/// Simulates a payload the HTTP layer already decoded as JSON.
pub fn with_json_body(mut request: RawRequest, raw_body: &str) -> RawRequest {
    request.payload = serde_json::from_str(raw_body).ok().map(Payload::Parsed);
    request.raw_payload = Some(raw_body.as_bytes().to_vec());
    request
}

pub fn build_stage_context(path: &str) -> StageContext {
    StageContext {
        stage: STAGE_FOR_MOCK_REQUESTS.to_owned(),
        path: path.to_owned(),
        ..StageContext::default()
    }
}
