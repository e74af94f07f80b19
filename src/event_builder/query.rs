use std::collections::HashMap;

use url::form_urlencoded;

pub(crate) type QueryStringParameters = HashMap<String, String>;
pub(crate) type MultiValueQueryStringParameters = HashMap<String, Vec<String>>;

/// Query string of a request target, without the leading `?` and any fragment.
fn query_of(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once('?')?;
    let query = rest.split_once('#').map_or(rest, |(query, _)| query);
    (!query.is_empty()).then_some(query)
}

/// Returns the single-value parameters (last occurrence wins, `None` when the query is
/// empty) and every value of every parameter in order.
pub(crate) fn parse(url: &str) -> (Option<QueryStringParameters>, MultiValueQueryStringParameters) {
    let mut single = QueryStringParameters::new();
    let mut multi = MultiValueQueryStringParameters::new();

    if let Some(query) = query_of(url) {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            multi
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
            single.insert(key.into_owned(), value.into_owned());
        }
    }

    ((!single.is_empty()).then_some(single), multi)
}
