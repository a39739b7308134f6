use crate::bounded::BoxError;

/// A parameter bag was replaced with data of the wrong shape.
///
/// Returned by the bulk mutators on
/// [`ServerRequest`](crate::ServerRequest), and when building
/// [`ServerParams`](crate::ServerParams). The rejected data is dropped and
/// the previous state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ShapeError {
    /// Cookie and query values must be strings, or maps of strings.
    #[error("{bag} parameter `{path}` must be a string or a nested map, found {found}")]
    NotStringOrMap {
        bag: &'static str,
        path: String,
        found: &'static str,
    },

    /// A nested map went deeper than the configured limit.
    #[error("{bag} parameter `{path}` is nested deeper than the limit of {limit}")]
    TooDeep {
        bag: &'static str,
        path: String,
        limit: usize,
    },

    /// Server parameters must be scalar.
    #[error("server parameter `{key}` must be a scalar, found {found}")]
    NotScalar { key: String, found: &'static str },

    /// Body parameters must be a map, or null to clear them.
    #[error("body parameters must be a map or null, found {found}")]
    NotAMap { found: &'static str },
}

/// The error returned by [`parse_body`](crate::extract::parse_body) and
/// [`collect`](crate::extract::collect) if reading the body fails.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BodyError {
    /// The body was larger than the configured limit.
    #[error("body larger than limit of {limit} bytes")]
    Overflow { limit: usize },

    /// The underlying stream returned an error.
    #[error("failed to read request body: {0}")]
    Io(#[source] BoxError),

    /// The body claimed to be JSON but was not.
    #[cfg(feature = "json")]
    #[error("failed to deserialize body: {0}")]
    Json(#[from] serde_json::Error),
}
