// src/normalize/path.rs

//! Fallback-path lookup over a case record.
//!
//! A candidate is a dot-separated path such as `subjectDescription.sex.name`
//! or `images.0.caption`. Candidates are tried in order and the first one
//! that lands on a usable value wins. Anything that does not fit the record's
//! shape (missing key, index into an object, key into a list, out of range)
//! is a dead end for that candidate, never an error.

use serde_json::Value;

use crate::core::sanitize::is_blank;

/// Follow one dotted path. `None` on any dead end.
pub fn walk<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = root;
    for seg in path.split('.') {
        cur = match cur {
            Value::Object(map) => map.get(seg)?,
            Value::Array(items) if is_index(seg) => items.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(cur)
}

fn is_index(seg: &str) -> bool {
    !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit())
}

/// String form of a node. `null` has none; containers render as compact JSON.
pub fn render(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(v).ok(),
    }
}

/// Trimmed text of a node, unless it is blank (`""`, `None`, `nan`, `[]`).
pub fn text(v: &Value) -> Option<String> {
    let s = render(v)?;
    let s = s.trim();
    (!is_blank(s)).then(|| s.to_string())
}

/// First candidate that lands on a node with usable `text`.
pub fn resolve(root: &Value, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|path| text(walk(root, path)?))
}

/// `resolve`, falling back to `default` when every candidate is exhausted.
pub fn resolve_or(root: &Value, candidates: &[&str], default: &str) -> String {
    resolve(root, candidates).unwrap_or_else(|| default.to_string())
}

/// JSON `true` only; anything else (missing, `"true"`, `1`) is false.
pub fn flag(root: &Value, key: &str) -> bool {
    matches!(walk(root, key), Some(Value::Bool(true)))
}
