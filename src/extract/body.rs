use crate::error::BodyError;
use crate::http::{header, Body, Bytes, HeaderMap};

use bytes::BytesMut;

/// Read a body into memory, failing if it is larger than `limit` bytes.
///
/// On failure the body is left partially consumed.
pub async fn collect(body: &mut Body, limit: usize) -> Result<Bytes, BodyError> {
    let mut buf = BytesMut::with_capacity(limit.min(8192));
    read_into(body, limit, &mut buf).await?;
    Ok(buf.freeze())
}

/// Like [`collect`], but every chunk taken from `body` ends up in `buf`,
/// including the one that crossed the limit.
pub(crate) async fn read_into(body: &mut Body, limit: usize, buf: &mut BytesMut) -> Result<(), BodyError> {
    while let Some(chunk) = body.chunk().await {
        buf.extend_from_slice(&chunk.map_err(BodyError::Io)?);

        if buf.len() > limit {
            return Err(BodyError::Overflow { limit });
        }
    }

    Ok(())
}

/// The declared `Content-Length`, if it is present and valid.
pub(crate) fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.parse::<usize>().ok())
}
