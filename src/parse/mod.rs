//! Parsing of flat `key=value` pairs into nested parameter bags.
//!
//! Keys use bracket notation to describe structure:
//!
//! - `a=1` sets `a` to `"1"`, replacing any earlier value.
//! - `a[x]=1&a[y]=2` builds the map `{"x": "1", "y": "2"}` at `a`.
//! - `a[]=1&a[]=2` appends, building `{"0": "1", "1": "2"}` at `a`.
//!
//! Keys and values are percent-decoded before their structure is parsed.

mod cookie;
mod key;
mod query;

pub use cookie::parse_cookies;
pub use query::parse_query;

pub(crate) use key::{insert, validate_strings, Conflict, KeyPath, Node};

use crate::config::ParseConfig;
use crate::value::{Map, Value};

/// Build a bag out of already decoded pairs.
pub(crate) fn collect_pairs<I>(pairs: I, config: &ParseConfig, bag: &'static str, conflict: Conflict) -> Map
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut map = Map::new();
    let mut pairs = pairs.into_iter();

    for (key, value) in pairs.by_ref().take(config.vars()) {
        let path = match KeyPath::parse(&key) {
            Some(path) => path,
            None => {
                tracing::debug!(bag, key = %key, "ignoring {} parameter with an empty name", bag);
                continue;
            }
        };

        if path.depth() > config.depth() {
            tracing::warn!(
                bag,
                key = %key,
                limit = config.depth(),
                "dropping {} parameter nested deeper than the limit",
                bag
            );
            continue;
        }

        insert(&mut map, &path, Value::String(value), conflict);
    }

    let dropped = pairs.count();
    if dropped > 0 {
        tracing::warn!(
            bag,
            dropped,
            limit = config.vars(),
            "too many {} parameters, dropping the rest",
            bag
        );
    }

    map
}
