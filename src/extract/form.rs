use crate::config::ParseConfig;
use crate::http::{header, HeaderMap};
use crate::parse::{collect_pairs, Conflict};
use crate::value::Map;

/// Decode a URL encoded form with the same rules as a query string.
pub(crate) fn parse_form(body: &[u8], config: &ParseConfig) -> Map {
    match serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
        Ok(pairs) => collect_pairs(pairs, config, "body", Conflict::Replace),
        Err(err) => {
            tracing::debug!(error = %err, "failed to decode form body");
            Map::new()
        }
    }
}

pub(crate) fn is_url_encoded(headers: &HeaderMap) -> bool {
    let mime = || {
        headers
            .get(header::CONTENT_TYPE)?
            .to_str()
            .ok()?
            .parse::<mime::Mime>()
            .ok()
    };

    match mime() {
        Some(mime) => mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str(),
        None => false,
    }
}
