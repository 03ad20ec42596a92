//! Field path resolution.
//!
//! A field path such as `products[0].category.name` is split into
//! identifier and index segments and walked against the context value.

use std::sync::LazyLock;

use regex::Regex;

use crate::{evaluator::EvalError, value::Value};

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|\[\d+\]").expect("segment pattern is valid"));

static NULL: Value = Value::Null;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment<'a> {
    /// Object key lookup
    ///
    /// # Examples
    /// - `user` → `Field("user")`
    /// - `user.name` → `[Field("user"), Field("name")]`
    Field(&'a str),

    /// Array element access
    ///
    /// # Examples
    /// - `items[0]` → `[Field("items"), Index(0)]`
    Index(usize),
}

/// Split a field path into its segments.
///
/// Characters that are neither word characters nor a bracketed index are
/// separators, so `a.b`, `a[0].b` and `a[0][1]` all work.
pub fn segments(path: &str) -> Result<Vec<PathSegment<'_>>, EvalError> {
    SEGMENT
        .find_iter(path)
        .map(|m| {
            let text = m.as_str();
            match text.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                Some(digits) => digits
                    .parse::<usize>()
                    .map(PathSegment::Index)
                    .map_err(|_| EvalError::InvalidIndex(text.to_string())),
                None => Ok(PathSegment::Field(text)),
            }
        })
        .collect()
}

/// Resolve `path` against `root`.
///
/// A missing key resolves to null. An index outside the array, or a segment
/// applied to a value of the wrong kind, is an error.
///
/// # Examples
///
/// ```
/// use logix::{path::resolve, Value};
/// use std::collections::HashMap;
///
/// let mut root = HashMap::new();
/// root.insert("tags".to_string(), Value::Array(vec![Value::String("a".into())]));
/// let root = Value::Object(root);
///
/// assert_eq!(resolve("tags[0]", &root).unwrap(), &Value::String("a".into()));
/// assert_eq!(resolve("missing", &root).unwrap(), &Value::Null);
/// assert!(resolve("tags[1]", &root).is_err());
/// ```
pub fn resolve<'v>(path: &str, root: &'v Value) -> Result<&'v Value, EvalError> {
    let mut current = root;

    for segment in segments(path)? {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Field(key)) => map.get(key).unwrap_or(&NULL),
            (Value::Array(items), PathSegment::Index(index)) => {
                items.get(index).ok_or(EvalError::IndexOutOfRange {
                    index,
                    len: items.len(),
                })?
            }
            (value, PathSegment::Field(key)) => {
                return Err(EvalError::InvalidPath {
                    segment: key.to_string(),
                    found: value.type_name(),
                });
            }
            (value, PathSegment::Index(index)) => {
                return Err(EvalError::InvalidPath {
                    segment: format!("[{}]", index),
                    found: value.type_name(),
                });
            }
        };
    }

    Ok(current)
}
