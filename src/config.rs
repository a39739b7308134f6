use serde::Deserialize;

/// Limits applied while turning raw request data into parameter bags.
///
/// The defaults are suitable for most applications. `ParseConfig` can
/// also be deserialized, with every missing field falling back to its
/// default:
///
/// ```
/// # #[cfg(feature = "json")] {
/// use bison_request::ParseConfig;
///
/// let config: ParseConfig = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
/// assert_eq!(config, ParseConfig::new().max_depth(8));
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    max_depth: usize,
    max_vars: usize,
    form_limit: usize,
    json_limit: usize,
}

impl ParseConfig {
    /// Create a [`ParseConfig`] instance with the default limits.
    pub fn new() -> Self {
        Self {
            max_depth: 64,
            max_vars: 1000,
            form_limit: 16_384,   // (~16kb)
            json_limit: 2_097_152, // (~2mb)
        }
    }

    /// Set the maximum nesting depth of bracketed keys such as `a[b][c]`.
    ///
    /// Keys nested deeper than this are dropped while parsing, and
    /// rejected when replacing a parameter bag. By default the limit is 64.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum number of pairs read from a single query string,
    /// cookie header, or form body.
    ///
    /// By default the limit is 1000.
    pub fn max_vars(mut self, vars: usize) -> Self {
        self.max_vars = vars;
        self
    }

    /// Set maximum number of bytes buffered from a URL encoded form body.
    ///
    /// By default the limit is 16kb.
    pub fn form_limit(mut self, limit: usize) -> Self {
        self.form_limit = limit;
        self
    }

    /// Set maximum number of bytes buffered from a JSON body.
    ///
    /// By default the limit is 2mb.
    pub fn json_limit(mut self, limit: usize) -> Self {
        self.json_limit = limit;
        self
    }
}

impl ParseConfig {
    pub(crate) fn depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn vars(&self) -> usize {
        self.max_vars
    }

    pub(crate) fn form_bytes(&self) -> usize {
        self.form_limit
    }

    pub(crate) fn json_bytes(&self) -> usize {
        self.json_limit
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new()
    }
}
