use super::{collect_pairs, Conflict};
use crate::config::ParseConfig;
use crate::value::Map;

/// Parse a URL query string (without the leading `?`) into a parameter bag.
///
/// Pairs are separated by `&` and split on the first `=`; a pair without
/// `=` has an empty value. `+` decodes to a space. When two pairs resolve
/// to the same key the later one wins, while bracketed keys merge into the
/// same nested map.
///
/// ```
/// use bison_request::parse::parse_query;
/// use bison_request::{Map, ParseConfig, Value};
///
/// let query = parse_query("a[]=1&a[]=2&b=x&b=y", &ParseConfig::default());
///
/// let a = Map::from([("0".into(), Value::from("1")), ("1".into(), Value::from("2"))]);
/// assert_eq!(query["a"], Value::Map(a));
/// assert_eq!(query["b"], Value::from("y"));
/// ```
pub fn parse_query(query: &str, config: &ParseConfig) -> Map {
    let pairs = match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs,
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode query string");
            return Map::new();
        }
    };

    collect_pairs(pairs, config, "query", Conflict::Replace)
}
