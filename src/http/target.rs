use http::Uri;

/// Reduce a request target to its origin-form: the path, followed by the
/// query string if there is one.
///
/// The scheme, authority and fragment are stripped. The path and query
/// are kept verbatim, including any percent-encoding.
///
/// ```
/// use bison_request::http::origin_form;
///
/// assert_eq!(origin_form("https://host/path?q=1#frag"), "/path?q=1");
/// assert_eq!(origin_form("/a%20b?"), "/a%20b");
/// assert_eq!(origin_form("http://host"), "/");
/// ```
pub fn origin_form(target: &str) -> String {
    let target = match target.find('#') {
        Some(fragment) => &target[..fragment],
        None => target,
    };

    let rest = match target.find("://") {
        // a scheme is only valid before any path or query
        Some(scheme) if !target[..scheme].contains(['/', '?']) => {
            let authority = &target[scheme + 3..];
            let end = authority.find(['/', '?']).unwrap_or(authority.len());
            &authority[end..]
        }
        _ => target,
    };

    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    join(path, query)
}

/// The origin-form of a parsed [`Uri`].
pub(crate) fn uri_origin_form(uri: &Uri) -> String {
    join(uri.path(), uri.query().unwrap_or_default())
}

fn join(path: &str, query: &str) -> String {
    let path = if path.is_empty() { "/" } else { path };

    if query.is_empty() {
        return path.to_owned();
    }

    let mut target = String::with_capacity(path.len() + query.len() + 1);
    target.push_str(path);
    target.push('?');
    target.push_str(query);
    target
}
