use super::{collect_pairs, Conflict};
use crate::config::ParseConfig;
use crate::value::Map;

use percent_encoding::percent_decode_str;

/// Parse the value of a `Cookie` header into a parameter bag.
///
/// Cookies are separated by `;` with surrounding whitespace trimmed. Names
/// and values are percent-decoded and follow the same bracket rules as
/// query strings, except that the first cookie with a given name wins: a
/// later `theme` is ignored, and so is a later `theme[x]` if `theme` is
/// already a plain value. Bracketed cookies sharing a root still merge,
/// with the later of `p[x]=1; p[x]=2` winning as it would in a query.
///
/// ```
/// use bison_request::parse::parse_cookies;
/// use bison_request::{ParseConfig, Value};
///
/// let cookies = parse_cookies("theme=dark; lang=en%2DUS; theme=light", &ParseConfig::default());
///
/// assert_eq!(cookies["theme"], Value::from("dark"));
/// assert_eq!(cookies["lang"], Value::from("en-US"));
/// ```
pub fn parse_cookies(header: &str, config: &ParseConfig) -> Map {
    let pairs = header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(name.trim_end()), decode(value.trim_start()))
        });

    collect_pairs(pairs, config, "cookie", Conflict::Keep)
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().into_owned()
}
