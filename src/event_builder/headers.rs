use std::collections::HashMap;

use model::raw_request::{Payload, RawHeader, RawRequest};
use serde_json::Value;

// Header case is not normalized, so every lookup checks the usual spellings.
pub(crate) const CONTENT_LENGTH_HEADERS: [&str; 3] =
    ["Content-Length", "content-length", "Content-length"];
pub(crate) const CONTENT_TYPE_HEADERS: [&str; 3] = ["Content-Type", "content-type", "Content-type"];
pub(crate) const AUTHORIZATION_HEADERS: [&str; 2] = ["Authorization", "authorization"];

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Request headers keyed by the name as the client sent it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedHeaders {
    headers: HashMap<String, String>,
    multi_value_headers: HashMap<String, Vec<String>>,
    /// Header names in the order they were first seen.
    names: Vec<String>,
}

impl NormalizedHeaders {
    pub fn from_raw(raw_headers: &[RawHeader]) -> Self {
        let mut normalized = Self::default();

        for header in raw_headers {
            normalized
                .multi_value_headers
                .entry(header.name().to_owned())
                .or_default()
                .push(header.value().to_owned());
            normalized.insert(header.name(), header.value());
        }

        normalized
    }

    /// Exact, case sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// First non-empty value among the given spellings.
    pub fn get_first_of(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| !value.is_empty())
    }

    pub fn contains_any(&self, names: &[&str]) -> bool {
        self.get_first_of(names).is_some()
    }

    /// Case insensitive lookup. When the same header was sent with different spellings,
    /// the most recently introduced spelling wins.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .rev()
            .find(|candidate| candidate.eq_ignore_ascii_case(name))
            .and_then(|candidate| self.get(candidate))
    }

    /// Single-value map plus the multi-value map, which is `None` when the request had no
    /// header lines at all. Injected headers only show up in the single-value map.
    pub fn into_maps(self) -> (HashMap<String, String>, Option<HashMap<String, Vec<String>>>) {
        let multi_value_headers =
            (!self.multi_value_headers.is_empty()).then_some(self.multi_value_headers);
        (self.headers, multi_value_headers)
    }

    fn insert(&mut self, name: &str, value: &str) {
        if !self.headers.contains_key(name) {
            self.names.push(name.to_owned());
        }
        self.headers.insert(name.to_owned(), value.to_owned());
    }
}

/// Event body and the number of bytes it had on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Body {
    pub text: String,
    pub byte_length: usize,
}

impl Body {
    fn from_text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            byte_length: text.len(),
        }
    }
}

/// Picks the event body. Textual payloads are used as they are, any other payload the HTTP
/// layer already decoded is replaced by the raw bytes it came from.
pub(crate) fn select_body(request: &RawRequest) -> Option<Body> {
    match &request.payload {
        None | Some(Payload::Parsed(Value::Null)) => None,
        Some(Payload::Text(text) | Payload::Parsed(Value::String(text))) if text.is_empty() => None,
        Some(Payload::Text(text) | Payload::Parsed(Value::String(text))) => {
            Some(Body::from_text(text))
        }
        Some(Payload::Parsed(parsed)) => match &request.raw_payload {
            Some(bytes) if bytes.is_empty() => None,
            Some(bytes) => Some(Body {
                text: String::from_utf8_lossy(bytes).into_owned(),
                byte_length: bytes.len(),
            }),
            None => Some(Body::from_text(&parsed.to_string())),
        },
    }
}

/// Builds the header maps and the body, filling in `Content-Length` and `Content-Type`
/// when a body is present and the client did not send them.
pub(crate) fn normalize(request: &RawRequest) -> (NormalizedHeaders, Option<String>) {
    let mut headers = NormalizedHeaders::from_raw(&request.raw_headers);

    let Some(body) = select_body(request) else {
        return (headers, None);
    };

    if !headers.contains_any(&CONTENT_LENGTH_HEADERS) {
        headers.insert(CONTENT_LENGTH_HEADERS[0], &body.byte_length.to_string());
    }
    if !headers.contains_any(&CONTENT_TYPE_HEADERS) {
        headers.insert(CONTENT_TYPE_HEADERS[0], DEFAULT_CONTENT_TYPE);
    }

    (headers, Some(body.text))
}
