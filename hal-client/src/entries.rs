//! Normalization of raw `_links` / `_embedded` entries.
//!
//! A relation may hold a single entry or a list of entries, and a link entry may
//! be a full object or a bare href string. Accessors never look at the raw JSON
//! directly; they go through the unions below.

use serde_json::{Map, Value};

/// Shape of the raw data stored under one relation
#[derive(Debug, Clone, Copy)]
pub(crate) enum Entries<'a> {
    One(&'a Value),
    Many(&'a [Value]),
}

impl<'a> Entries<'a> {
    pub(crate) fn of(data: &'a Value) -> Self {
        if is_falsy(data) {
            return Self::Many(&[]);
        }

        match data {
            Value::Array(items) => Self::Many(items),
            other => Self::One(other),
        }
    }

    /// Non-null entries in document order
    pub(crate) fn iter(self) -> impl Iterator<Item = &'a Value> {
        let items: &'a [Value] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(items) => items,
        };
        items.iter().filter(|entry| !entry.is_null())
    }
}

/// A single raw link entry
#[derive(Debug, Clone, Copy)]
pub(crate) enum LinkEntry<'a> {
    Href(&'a str),
    Full(&'a Map<String, Value>),
}

impl<'a> LinkEntry<'a> {
    /// Anything that is neither an object nor a string yields an empty href
    pub(crate) fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Full(map),
            Value::String(href) => Self::Href(href),
            _ => Self::Href(""),
        }
    }

    /// String member of a full entry, `None` for bare hrefs or non-string values
    pub(crate) fn string_member(&self, key: &str) -> Option<&'a str> {
        match self {
            Self::Full(map) => map.get(key).and_then(Value::as_str),
            Self::Href(_) => None,
        }
    }
}

pub(crate) fn link_entries(data: &Value) -> impl Iterator<Item = LinkEntry<'_>> {
    Entries::of(data).iter().map(LinkEntry::from_value)
}

pub(crate) fn resource_entries(data: &Value) -> impl Iterator<Item = &Value> {
    Entries::of(data).iter()
}

/// Loose truthiness used to decide whether a relation carries any entries
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Flatten a decoded value into a property map.
///
/// Objects are taken as-is, arrays are keyed by position and any other scalar
/// becomes the single property `"0"`; `null` yields no properties.
pub(crate) fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::Null => Map::new(),
        scalar => {
            let mut map = Map::new();
            map.insert("0".to_string(), scalar);
            map
        }
    }
}
