// src/normalize/lists.rs

use serde_json::Value;

use super::path::resolve;
use crate::error::RecordError;

/// Joins item strings of one list column.
pub const ITEM_SEP: &str = " | ";

/// A record key holding a list of sub-objects, and where each item keeps its name.
#[derive(Clone, Copy, Debug)]
pub struct ListField {
    pub key: &'static str,
    pub names: &'static [&'static str],
}

pub const CLOTHING: ListField = ListField {
    key: "clothingAndAccessoriesArticles",
    names: &["category.name", "article.name"],
};
pub const CLOTHING_LEGACY: ListField = ListField {
    key: "clothingAndAccessories",
    names: &["category.name"],
};
pub const FEATURES: ListField = ListField {
    key: "physicalFeatureDescriptions",
    names: &["physicalFeature.name"],
};
pub const FEATURES_LEGACY: ListField = ListField {
    key: "physicalIdentifiers",
    names: &["type.name"],
};

/// Sub-objects under `key`. Missing or `null` is an empty list; anything
/// else that is not an array of objects makes the record malformed.
pub fn objects<'a>(rec: &'a Value, key: &'static str) -> Result<&'a [Value], RecordError> {
    match rec.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => {
            if items.iter().all(Value::is_object) {
                Ok(items.as_slice())
            } else {
                Err(RecordError::Malformed { field: key })
            }
        }
        Some(_) => Err(RecordError::Malformed { field: key }),
    }
}

/// `"<name>: <description>"`, or whichever of the two exists.
pub fn describe(name: Option<String>, desc: Option<String>) -> Option<String> {
    match (name, desc) {
        (Some(n), Some(d)) => Some(format!("{n}: {d}")),
        (Some(n), None) => Some(n),
        (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}

/// Aggregate one list column. A value under `field.key` that is not an array
/// yields `""`; non-object items make the record malformed.
pub fn aggregate(rec: &Value, field: ListField) -> Result<String, RecordError> {
    let items = match rec.get(field.key) {
        Some(Value::Array(items)) => items,
        _ => return Ok(String::new()),
    };

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            return Err(RecordError::Malformed { field: field.key });
        }
        let name = resolve(item, field.names);
        let desc = resolve(item, &["description"]);
        if let Some(s) = describe(name, desc) {
            parts.push(s);
        }
    }
    Ok(parts.join(ITEM_SEP))
}

/// `aggregate(primary)`, or `aggregate(legacy)` when the primary comes back empty.
pub fn aggregate_with_legacy(
    rec: &Value,
    primary: ListField,
    legacy: ListField,
) -> Result<String, RecordError> {
    let out = aggregate(rec, primary)?;
    if !out.is_empty() { return Ok(out); }
    aggregate(rec, legacy)
}
