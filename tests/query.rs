use bison_request::parse::parse_query;
use bison_request::{Map, ParseConfig, Value};

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

fn parse(query: &str) -> Map {
    parse_query(query, &ParseConfig::default())
}

#[test]
fn last_flat_key_wins() {
    let query = parse("a=1&a=2");

    assert_eq!(query.len(), 1);
    assert_eq!(query["a"], Value::from("2"));
}

#[test]
fn appends_accumulate() {
    let query = parse("a[]=1&a[]=2");

    assert_eq!(query["a"], map([("0", "1".into()), ("1", "2".into())]));
}

#[test]
fn nested_keys_merge() {
    let query = parse("a[x]=1&a[y]=2");

    assert_eq!(query["a"], map([("x", "1".into()), ("y", "2".into())]));
}

#[test]
fn deeply_nested() {
    let query = parse("user[name][first]=Ada&user[name][last]=Lovelace&user[tags][]=math");

    assert_eq!(
        query["user"],
        map([
            (
                "name",
                map([("first", "Ada".into()), ("last", "Lovelace".into())])
            ),
            ("tags", map([("0", "math".into())])),
        ])
    );
}

#[test]
fn missing_value_is_empty() {
    let query = parse("flag&empty=&x=1");

    assert_eq!(query["flag"], Value::from(""));
    assert_eq!(query["empty"], Value::from(""));
    assert_eq!(query["x"], Value::from("1"));
}

#[test]
fn splits_on_first_equals() {
    let query = parse("expr=a=b");

    assert_eq!(query["expr"], Value::from("a=b"));
}

#[test]
fn decodes_before_parsing_structure() {
    let query = parse("a%5B%5D=x%20y&a%5B%5D=z+w&name=J%C3%BCrgen");

    assert_eq!(query["a"], map([("0", "x y".into()), ("1", "z w".into())]));
    assert_eq!(query["name"], Value::from("Jürgen"));
}

#[test]
fn append_continues_after_numeric_keys() {
    let query = parse("a[5]=x&a[]=y&a[foo]=z&a[]=w");

    assert_eq!(
        query["a"],
        map([
            ("5", "x".into()),
            ("6", "y".into()),
            ("foo", "z".into()),
            ("7", "w".into()),
        ])
    );
}

#[test]
fn scalar_and_nested_overwrite_each_other() {
    let query = parse("a=1&a[b]=2");
    assert_eq!(query["a"], map([("b", "2".into())]));

    let query = parse("a[b]=2&a=1");
    assert_eq!(query["a"], Value::from("1"));
}

#[test]
fn empty_root_is_ignored() {
    let query = parse("[x]=1&=2&ok=3");

    assert_eq!(query.len(), 1);
    assert_eq!(query["ok"], Value::from("3"));
}

#[test]
fn unterminated_bracket_is_flat() {
    let query = parse("a[b=1");

    assert_eq!(query["a[b"], Value::from("1"));
}

#[test]
fn trailing_characters_are_ignored() {
    let query = parse("a[b]c[d]=1");

    assert_eq!(query["a"], map([("b", "1".into())]));
}

#[test]
fn preserves_order() {
    let query = parse("z=1&a=2&m=3");

    assert!(query.keys().eq(["z", "a", "m"]));
}

#[test]
fn empty_query() {
    assert!(parse("").is_empty());
    assert!(parse("&&").is_empty());
}

#[test]
fn drops_keys_nested_too_deep() {
    let config = ParseConfig::new().max_depth(2);
    let query = parse_query("ok[a][b]=1&deep[a][b][c]=2", &config);

    assert_eq!(query.len(), 1);
    assert!(query.contains_key("ok"));
}

#[test]
fn drops_pairs_over_the_limit() {
    let config = ParseConfig::new().max_vars(2);
    let query = parse_query("a=1&b=2&c=3", &config);

    assert!(query.keys().eq(["a", "b"]));
}
