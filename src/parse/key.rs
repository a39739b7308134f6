use crate::error::ShapeError;
use crate::value::{Map, Value};

use indexmap::IndexMap;

/// A form field or query key, split into its bracketed segments.
///
/// `a[b][]` parses as the root `a` followed by `Key("b")` and `Append`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct KeyPath<'a> {
    root: &'a str,
    segments: Vec<Segment<'a>>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// `[]`
    Append,
    /// `[name]`
    Key(&'a str),
}

impl<'a> KeyPath<'a> {
    /// Returns `None` for keys with an empty root, such as `[a]=1`.
    pub(crate) fn parse(key: &'a str) -> Option<KeyPath<'a>> {
        let key = key.trim_start_matches(' ');

        // an unterminated bracket makes the whole key flat
        let (root, mut rest) = match key.find('[') {
            Some(open) if key[open..].contains(']') => (&key[..open], &key[open..]),
            _ => (key, ""),
        };

        if root.is_empty() {
            return None;
        }

        let mut segments = Vec::new();

        // anything trailing the last well-formed segment is ignored
        while let Some(inner) = rest.strip_prefix('[') {
            let close = match inner.find(']') {
                Some(close) => close,
                None => break,
            };

            segments.push(match &inner[..close] {
                "" => Segment::Append,
                name => Segment::Key(name),
            });

            rest = &inner[close + 1..];
        }

        Some(KeyPath { root, segments })
    }

    /// The number of bracketed segments.
    pub(crate) fn depth(&self) -> usize {
        self.segments.len()
    }
}

/// A node of a bracket-keyed tree.
pub(crate) trait Node: Sized {
    /// An empty branch.
    fn empty() -> Self;

    /// The children of this node, turning it into an empty branch first
    /// if it is currently a leaf.
    fn branch(&mut self) -> &mut IndexMap<String, Self>;

    fn is_branch(&self) -> bool;
}

impl Node for Value {
    fn empty() -> Self {
        Value::Map(Map::new())
    }

    fn branch(&mut self) -> &mut Map {
        match self {
            Value::Map(map) => map,
            leaf => {
                *leaf = Value::empty();
                leaf.branch()
            }
        }
    }

    fn is_branch(&self) -> bool {
        matches!(self, Value::Map(_))
    }
}

/// What happens when a leaf is written to a key that already exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Conflict {
    /// The later write wins.
    Replace,
    /// A root that is already set is never overwritten by a later write,
    /// and a string root is never turned into a map. Later writes below a
    /// root that is already a map still replace its leaves.
    Keep,
}

/// Write `leaf` into `tree` at `path`, creating intermediate branches.
pub(crate) fn insert<T>(tree: &mut IndexMap<String, T>, path: &KeyPath<'_>, leaf: T, conflict: Conflict)
where
    T: Node,
{
    if conflict == Conflict::Keep {
        if let Some(existing) = tree.get(path.root) {
            if path.segments.is_empty() || !existing.is_branch() {
                return;
            }
        }
    }

    let mut branch = tree;
    let mut key = path.root.to_owned();

    for segment in &path.segments {
        branch = branch.entry(key).or_insert_with(T::empty).branch();

        key = match segment {
            Segment::Append => next_index(branch),
            Segment::Key(name) => (*name).to_owned(),
        };
    }

    branch.insert(key, leaf);
}

/// One past the largest integer key, or `0`.
fn next_index<T>(branch: &IndexMap<String, T>) -> String {
    branch
        .keys()
        .filter_map(|key| as_index(key))
        .max()
        .map_or(0, |max| max.saturating_add(1))
        .to_string()
}

/// Parse keys in canonical decimal form: `0`, `7`, `42`, but not `07` or `+7`.
fn as_index(key: &str) -> Option<u64> {
    match key.as_bytes() {
        [b'0'] => Some(0),
        [b'1'..=b'9', rest @ ..] if rest.iter().all(u8::is_ascii_digit) => key.parse().ok(),
        _ => None,
    }
}

/// Check that every value in `map` is a string or a nested map of strings,
/// at most `limit` levels deep.
pub(crate) fn validate_strings(bag: &'static str, map: &Map, limit: usize) -> Result<(), ShapeError> {
    fn check(bag: &'static str, path: String, value: &Value, depth: usize, limit: usize) -> Result<(), ShapeError> {
        match value {
            Value::String(_) => Ok(()),
            Value::Map(_) if depth >= limit => Err(ShapeError::TooDeep { bag, path, limit }),
            Value::Map(map) => map.iter().try_for_each(|(key, value)| {
                check(bag, format!("{}[{}]", path, key), value, depth + 1, limit)
            }),
            other => Err(ShapeError::NotStringOrMap {
                bag,
                path,
                found: other.kind(),
            }),
        }
    }

    map.iter()
        .try_for_each(|(key, value)| check(bag, key.clone(), value, 0, limit))
}
