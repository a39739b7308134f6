//! The incoming server-side HTTP request.
//!
//! A [`ServerRequest`] is assembled once per request by transport-facing
//! code and handed down a processing pipeline. Every stage can read the
//! message, the [server environment](ServerParams) and the
//! [uploaded files](upload::UploadedFiles), and can replace the cookie,
//! query and body parameters or attach [attributes](Attributes) for later
//! stages.

mod attributes;
mod bounded;
mod config;
mod error;
mod value;

pub mod extract;
pub mod http;
pub mod parse;
pub mod server;
pub mod upload;

pub use attributes::Attributes;
pub use bounded::BoxError;
pub use config::ParseConfig;
pub use error::{BodyError, ShapeError};
pub use crate::http::{RequestBuilder, ServerRequest};
pub use server::ServerParams;
pub use value::{Map, Value};
