use crate::http::{header, HeaderMap};
use crate::value::{Map, Value};

/// Deserialize a JSON body.
///
/// Returns `None` for an empty body or a document that isn't an object.
pub(crate) fn parse_json(body: &[u8]) -> Result<Option<Map>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice::<Value>(body)? {
        Value::Map(map) => Ok(Some(map)),
        other => {
            tracing::debug!(found = other.kind(), "JSON body is not an object");
            Ok(None)
        }
    }
}

pub(crate) fn is_json(headers: &HeaderMap) -> bool {
    let mime = || {
        headers
            .get(header::CONTENT_TYPE)?
            .to_str()
            .ok()?
            .parse::<mime::Mime>()
            .ok()
    };

    match mime() {
        Some(mime) => mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON),
        None => false,
    }
}
