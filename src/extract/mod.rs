//! Turning a request body into body parameters.

mod body;
mod form;
#[cfg(feature = "json")]
mod json;

pub use body::collect;

use crate::error::BodyError;
use crate::http::{Body, HeaderMap, ServerRequest};
#[cfg(feature = "json")]
use crate::value::Map;

use bytes::BytesMut;

#[derive(Clone, Copy, Debug)]
enum Format {
    Form,
    #[cfg(feature = "json")]
    Json,
}

/// Parse the request body into [body parameters](ServerRequest::body_params).
///
/// URL encoded forms are decoded with the same bracket rules as query
/// strings. JSON bodies are stored if they contain an object; any other
/// JSON document, or invalid JSON, clears the body parameters. Bodies of any
/// other media type are left alone and the body parameters are unchanged.
///
/// The buffered body is put back into the request, so later stages can
/// still read it. This holds when reading fails too: whatever was read is
/// placed in front of the rest of the stream. Reading stops with
/// [`BodyError::Overflow`] once the body exceeds [`ParseConfig::form_limit`](crate::ParseConfig::form_limit) or
/// [`ParseConfig::json_limit`](crate::ParseConfig::json_limit).
pub async fn parse_body(req: &mut ServerRequest) -> Result<(), BodyError> {
    let format = match detect(req.headers()) {
        Some(format) => format,
        None => {
            tracing::debug!("unsupported body media type, skipping");
            return Ok(());
        }
    };

    let limit = match format {
        Format::Form => req.config().form_bytes(),
        #[cfg(feature = "json")]
        Format::Json => req.config().json_bytes(),
    };

    if body::content_length(req.headers()) > Some(limit) {
        return Err(BodyError::Overflow { limit });
    }

    let mut body = req.take_body();
    let mut buf = BytesMut::with_capacity(limit.min(8192));
    let read = body::read_into(&mut body, limit, &mut buf).await;
    let bytes = buf.freeze();

    if let Err(err) = read {
        tracing::debug!(error = %err, read = bytes.len(), "failed to buffer request body");
        *req.body_mut() = body.prepend(bytes);
        return Err(err);
    }

    *req.body_mut() = Body::once(bytes.clone());

    tracing::debug!(?format, len = bytes.len(), "parsing request body");

    match format {
        Format::Form => {
            let params = form::parse_form(&bytes, req.config());
            req.replace_body_params(params);
        }
        #[cfg(feature = "json")]
        Format::Json => match json::parse_json(&bytes) {
            Ok(params) => req.replace_body_params(params.unwrap_or_default()),
            Err(err) => {
                req.replace_body_params(Map::new());
                return Err(err.into());
            }
        },
    }

    Ok(())
}

#[cfg(feature = "json")]
fn detect(headers: &HeaderMap) -> Option<Format> {
    if form::is_url_encoded(headers) {
        Some(Format::Form)
    } else if json::is_json(headers) {
        Some(Format::Json)
    } else {
        None
    }
}

#[cfg(not(feature = "json"))]
fn detect(headers: &HeaderMap) -> Option<Format> {
    form::is_url_encoded(headers).then_some(Format::Form)
}
