//! The HTTP message types a request is built from.

mod body;
mod request;
mod target;

pub use body::Body;
pub use request::{RequestBuilder, ServerRequest};
pub use target::origin_form;

pub(crate) use target::uri_origin_form;

pub use bytes::Bytes;
pub use http::{header, Extensions, HeaderMap, HeaderValue, Method, Uri, Version};
