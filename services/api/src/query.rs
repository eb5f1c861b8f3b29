//! Query-string composition for listing endpoints
//!
//! Listing endpoints accept a plain record of optional filters. Only the keys
//! a resource enumerates are read, in the order it enumerates them; empty
//! values are left out entirely.

use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::{ClientError, ClientResult};

/// Plain record of optional query filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(Map<String, Value>);

impl Filters {
    /// Create an empty filter record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a filter value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Build a filter record from any type serializing to a JSON object
    pub fn from_serialize<T: Serialize>(value: &T) -> ClientResult<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            _ => Err(ClientError::Validation(
                "Filters must be a JSON object".to_string(),
            )),
        }
    }

    /// Query value for a key, if it is set to something non-empty
    pub fn value(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(query_value)
    }

    /// Whether no filter key is present at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Filters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Scalar rendering of a filter value; null, false, zero, empty strings and
/// nested structures are treated as unset
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Append form-encoded parameters to a path; no `?` when there are none
pub fn append_query<'a, I>(path: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut empty = true;

    for (key, value) in params {
        serializer.append_pair(key, &value);
        empty = false;
    }

    if empty {
        path.to_string()
    } else {
        format!("{}?{}", path, serializer.finish())
    }
}

/// Append the recognized filters to a path, in enumeration order
pub fn with_filters(path: &str, keys: &[&'static str], filters: &Filters) -> String {
    append_query(
        path,
        keys.iter()
            .filter_map(|key| filters.value(key).map(|value| (*key, value))),
    )
}
