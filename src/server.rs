//! A snapshot of the environment a request is processed in.

use crate::error::ShapeError;
use crate::value::{Map, Value};

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

/// The client's IP address.
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
/// The client's port.
pub const REMOTE_PORT: &str = "REMOTE_PORT";
/// The local IP address the request was accepted on.
pub const SERVER_ADDR: &str = "SERVER_ADDR";
/// The local port the request was accepted on.
pub const SERVER_PORT: &str = "SERVER_PORT";
/// When the request started, in whole seconds since the Unix epoch.
pub const REQUEST_TIME: &str = "REQUEST_TIME";
/// When the request started, in fractional seconds since the Unix epoch.
pub const REQUEST_TIME_FLOAT: &str = "REQUEST_TIME_FLOAT";
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const REQUEST_URI: &str = "REQUEST_URI";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";

/// Facts about the process and connection a request arrived on, such as
/// the remote address or the time it was received.
///
/// Server parameters are captured once when the request is assembled and
/// can't be changed afterwards. No key is guaranteed to be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerParams(Map);

impl ServerParams {
    /// Create a [`ServerParamsBuilder`].
    pub fn builder() -> ServerParamsBuilder {
        ServerParamsBuilder::default()
    }

    /// Returns the parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the parameter with the given name if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// A copy of the parameters as a plain map.
    pub fn to_map(&self) -> Map {
        self.0.clone()
    }
}

impl TryFrom<Map> for ServerParams {
    type Error = ShapeError;

    fn try_from(map: Map) -> Result<Self, ShapeError> {
        if let Some((key, value)) = map.iter().find(|(_, value)| !value.is_scalar()) {
            return Err(ShapeError::NotScalar {
                key: key.clone(),
                found: value.kind(),
            });
        }

        Ok(ServerParams(map))
    }
}

/// Builds [`ServerParams`] from the facts a transport knows about a request.
///
/// ```
/// use bison_request::server::{self, ServerParams};
///
/// let params = ServerParams::builder()
///     .remote_addr("203.0.113.7:49152".parse().unwrap())
///     .param("HTTPS", "on")
///     .build()
///     .unwrap();
///
/// assert_eq!(params.get_str(server::REMOTE_ADDR), Some("203.0.113.7"));
/// assert_eq!(params.get_str("HTTPS"), Some("on"));
/// ```
#[derive(Debug, Default)]
pub struct ServerParamsBuilder {
    map: Map,
}

impl ServerParamsBuilder {
    /// Record the client's address as [`REMOTE_ADDR`] and [`REMOTE_PORT`].
    pub fn remote_addr(self, addr: SocketAddr) -> Self {
        self.param(REMOTE_ADDR, addr.ip().to_string())
            .param(REMOTE_PORT, addr.port())
    }

    /// Record the local address as [`SERVER_ADDR`] and [`SERVER_PORT`].
    pub fn server_addr(self, addr: SocketAddr) -> Self {
        self.param(SERVER_ADDR, addr.ip().to_string())
            .param(SERVER_PORT, addr.port())
    }

    /// Record when the request started as [`REQUEST_TIME`] and
    /// [`REQUEST_TIME_FLOAT`].
    ///
    /// Times before the Unix epoch are recorded as the epoch.
    pub fn request_time(self, time: SystemTime) -> Self {
        let since = time.duration_since(UNIX_EPOCH).unwrap_or_default();
        let secs = i64::try_from(since.as_secs()).unwrap_or(i64::MAX);

        self.param(REQUEST_TIME, secs)
            .param(REQUEST_TIME_FLOAT, since.as_secs_f64())
    }

    /// Record the request line: [`REQUEST_METHOD`], [`REQUEST_URI`],
    /// [`QUERY_STRING`] and [`SERVER_PROTOCOL`].
    pub fn request(self, head: &http::request::Parts) -> Self {
        let uri = head
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        self.param(REQUEST_METHOD, head.method.as_str())
            .param(REQUEST_URI, uri)
            .param(QUERY_STRING, head.uri.query().unwrap_or_default())
            .param(SERVER_PROTOCOL, format!("{:?}", head.version))
    }

    /// Add an arbitrary parameter, replacing any earlier one with the same name.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map.insert(name.into(), value.into());
        self
    }

    /// Build the [`ServerParams`].
    ///
    /// Fails if any parameter is a list or a map.
    pub fn build(self) -> Result<ServerParams, ShapeError> {
        ServerParams::try_from(self.map)
    }
}
