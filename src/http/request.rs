use super::{uri_origin_form, Body, HeaderMap, Method, Uri, Version};
use crate::attributes::Attributes;
use crate::config::ParseConfig;
use crate::error::ShapeError;
use crate::parse::{parse_cookies, parse_query, validate_strings};
use crate::server::ServerParams;
use crate::upload::UploadedFiles;
use crate::value::{Map, Value};

use http::header::{HeaderName, COOKIE};
use http::request::Parts;

use std::mem;

/// An incoming HTTP request, as seen by the server.
///
/// A `ServerRequest` joins what the transport received (method, target,
/// version, headers and body) with a snapshot of the server environment,
/// and carries the request-scoped state later processing stages work
/// with: cookie, query and body parameters, plus free-form attributes.
///
/// The message itself, the [server parameters](Self::server_params), and
/// the [uploaded files](Self::file_params) are fixed when the request is
/// assembled. The parameter bags and attributes may be replaced at any
/// point by whoever owns the request; the latest write wins.
#[derive(Debug)]
pub struct ServerRequest {
    head: Parts,
    body: Body,
    server: ServerParams,
    files: UploadedFiles,
    cookies: Map,
    query: Map,
    parsed_body: Map,
    attributes: Attributes,
    config: ParseConfig,
}

impl ServerRequest {
    /// Assemble a request from what the transport received.
    ///
    /// Query parameters are parsed from the URI, and cookie parameters from
    /// every `Cookie` header. Body parameters start out empty, see
    /// [`parse_body`](crate::extract::parse_body).
    pub fn from_http(
        req: http::Request<Body>,
        server: ServerParams,
        files: UploadedFiles,
        config: ParseConfig,
    ) -> Self {
        let (head, body) = req.into_parts();

        let query = head
            .uri
            .query()
            .map(|query| parse_query(query, &config))
            .unwrap_or_default();

        let cookies = cookie_header(&head.headers)
            .map(|header| parse_cookies(&header, &config))
            .unwrap_or_default();

        tracing::trace!(
            method = %head.method,
            uri = %head.uri,
            query = query.len(),
            cookies = cookies.len(),
            files = files.len(),
            "assembled server request"
        );

        ServerRequest {
            head,
            body,
            server,
            files,
            cookies,
            query,
            parsed_body: Map::new(),
            attributes: Attributes::new(),
            config,
        }
    }

    /// Create a [`RequestBuilder`], mostly useful for tests.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }
}

impl ServerRequest {
    /// The request method, exactly as received.
    pub fn method(&self) -> &Method {
        &self.head.method
    }

    /// The request target in origin-form: the path, followed by `?` and
    /// the query string if the query is not empty.
    ///
    /// Scheme, authority and fragment are never included.
    pub fn url(&self) -> String {
        uri_origin_form(&self.head.uri)
    }

    /// The full request URI.
    pub fn uri(&self) -> &Uri {
        &self.head.uri
    }

    pub fn version(&self) -> Version {
        self.head.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Take the body out of the request, leaving an empty one behind.
    pub fn take_body(&mut self) -> Body {
        mem::take(&mut self.body)
    }

    /// The limits this request was assembled with.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }
}

impl ServerRequest {
    /// The server environment the request was received in.
    pub fn server_params(&self) -> &ServerParams {
        &self.server
    }

    /// Metadata about the files submitted with the request.
    pub fn file_params(&self) -> &UploadedFiles {
        &self.files
    }

    pub fn cookie_params(&self) -> &Map {
        &self.cookies
    }

    /// Replace the cookie parameters.
    ///
    /// Every value must be a string, or a map of strings nested no deeper
    /// than [`ParseConfig::max_depth`]. Otherwise the cookies are left
    /// untouched and an error is returned.
    pub fn set_cookie_params(&mut self, cookies: Map) -> Result<(), ShapeError> {
        validate_strings("cookie", &cookies, self.config.depth())?;
        tracing::trace!(len = cookies.len(), "replacing cookie parameters");
        self.cookies = cookies;
        Ok(())
    }

    pub fn query_params(&self) -> &Map {
        &self.query
    }

    /// Replace the query parameters.
    ///
    /// The same shape rules as [`set_cookie_params`](Self::set_cookie_params)
    /// apply.
    pub fn set_query_params(&mut self, query: Map) -> Result<(), ShapeError> {
        validate_strings("query", &query, self.config.depth())?;
        tracing::trace!(len = query.len(), "replacing query parameters");
        self.query = query;
        Ok(())
    }

    /// The structured body, or an empty map if the body has not been
    /// parsed or did not contain a map.
    pub fn body_params(&self) -> &Map {
        &self.parsed_body
    }

    /// Replace the body parameters.
    ///
    /// A [`Value::Map`] replaces the current parameters and [`Value::Null`]
    /// clears them. Anything else is rejected.
    pub fn set_body_params(&mut self, params: impl Into<Value>) -> Result<(), ShapeError> {
        self.parsed_body = match params.into() {
            Value::Map(map) => map,
            Value::Null => Map::new(),
            other => return Err(ShapeError::NotAMap { found: other.kind() }),
        };

        tracing::trace!(len = self.parsed_body.len(), "replacing body parameters");
        Ok(())
    }

    pub(crate) fn replace_body_params(&mut self, params: Map) {
        tracing::trace!(len = params.len(), "replacing body parameters");
        self.parsed_body = params;
    }
}

impl ServerRequest {
    /// All attributes.
    ///
    /// Clone the returned value to keep a snapshot.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the attribute with the given name, or `default` if there
    /// is none.
    pub fn attribute(&self, name: &str, default: impl Into<Value>) -> Value {
        match self.attributes.get(name) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Returns a reference to the attribute with the given name.
    pub fn attribute_ref(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Replace all attributes.
    pub fn set_attributes(&mut self, attributes: impl Into<Attributes>) {
        self.attributes = attributes.into();
    }

    /// Set a single attribute, leaving all others untouched.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name, value);
    }

    /// Remove a single attribute, returning it if it was set.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

/// Every `Cookie` header joined into one, skipping values that aren't
/// valid UTF-8.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let values = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>();

    if values.is_empty() {
        return None;
    }

    Some(values.join("; "))
}

/// A builder for [`ServerRequest`]s.
///
/// ```
/// use bison_request::{ServerRequest, Value};
///
/// let req = ServerRequest::builder()
///     .method("POST")
///     .uri("https://example.com/search?q=bison")
///     .header("cookie", "theme=dark")
///     .body("")
///     .unwrap();
///
/// assert_eq!(req.url(), "/search?q=bison");
/// assert_eq!(req.query_params()["q"], Value::from("bison"));
/// assert_eq!(req.cookie_params()["theme"], Value::from("dark"));
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    inner: http::request::Builder,
    server: ServerParams,
    files: UploadedFiles,
    config: ParseConfig,
}

impl RequestBuilder {
    pub fn new() -> Self {
        RequestBuilder {
            inner: http::request::Builder::new(),
            server: ServerParams::default(),
            files: UploadedFiles::default(),
            config: ParseConfig::default(),
        }
    }

    pub fn method<T>(mut self, method: T) -> Self
    where
        T: TryInto<Method>,
        <T as TryInto<Method>>::Error: Into<http::Error>,
    {
        self.inner = self.inner.method(method);
        self
    }

    pub fn uri<T>(mut self, uri: T) -> Self
    where
        T: TryInto<Uri>,
        <T as TryInto<Uri>>::Error: Into<http::Error>,
    {
        self.inner = self.inner.uri(uri);
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.inner = self.inner.version(version);
        self
    }

    /// Append a header.
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        <K as TryInto<HeaderName>>::Error: Into<http::Error>,
        V: TryInto<http::HeaderValue>,
        <V as TryInto<http::HeaderValue>>::Error: Into<http::Error>,
    {
        self.inner = self.inner.header(name, value);
        self
    }

    pub fn server_params(mut self, server: ServerParams) -> Self {
        self.server = server;
        self
    }

    pub fn uploaded_files(mut self, files: UploadedFiles) -> Self {
        self.files = files;
        self
    }

    pub fn config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder, producing a [`ServerRequest`] with the given body.
    ///
    /// Fails if any of the message parts given to the builder were invalid.
    pub fn body(self, body: impl Into<Body>) -> Result<ServerRequest, http::Error> {
        let req = self.inner.body(body.into())?;
        Ok(ServerRequest::from_http(req, self.server, self.files, self.config))
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
