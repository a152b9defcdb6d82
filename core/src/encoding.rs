//! Query string and form body encoding.
//!
//! Query strings are percent-encoded (space becomes `%20`); form bodies follow
//! `application/x-www-form-urlencoded` rules. Pair order follows map
//! iteration order, which is unspecified.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use url::form_urlencoded;

/// Everything except RFC 3986 unreserved characters.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encode query parameters as `?k=v&k=v`, or an empty string when there are none.
pub fn encode_query(params: &HashMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect();
    format!("?{}", pairs.join("&"))
}

/// Encode a request body as `k=v&k=v`. Non-string values use their JSON text.
pub fn encode_form(body: &HashMap<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in body {
        match value {
            Value::String(s) => serializer.append_pair(key, s),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }
    serializer.finish()
}

/// Decode `k=v&k=v` (with or without a leading `?`) back into pairs.
pub fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    let encoded = encoded.strip_prefix('?').unwrap_or(encoded);
    form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
