//! Raw filter parameters as delivered by form or query-string decoding.
//!
//! Each incoming value is classified exactly once into a [`RawValue`]. The
//! merge engine then matches on the variant instead of sniffing shapes, and
//! values it has no rule for arrive as an explicit [`RawValue::Unsupported`].

use crate::error::{FilterError, Result};
use crate::model::FilterKey;
use serde_json::{Map, Value};

/// A decoded raw parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A plain string, e.g. `"true"` or `"false"` for boolean filters.
    Literal(String),
    /// An object carrying string `min` and `max` fields.
    RangeBounds { min: String, max: String },
    /// A sequence of scalar values, e.g. the checked boxes of a multi-select.
    StringList(Vec<String>),
    /// A one-element sequence holding a `[`-prefixed JSON array literal.
    BracketLiteral(String),
    /// Any other object.
    Map(Map<String, Value>),
    /// Shapes no merge rule handles.
    Unsupported(Value),
}

impl RawValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => RawValue::Literal(s),
            Value::Array(items) => Self::from_array(items),
            Value::Object(map) => Self::from_object(map),
            other => RawValue::Unsupported(other),
        }
    }

    fn from_array(items: Vec<Value>) -> Self {
        if let [Value::String(s)] = items.as_slice() {
            if s.starts_with('[') {
                return RawValue::BracketLiteral(s.clone());
            }
        }

        let scalars = items
            .iter()
            .all(|item| matches!(item, Value::String(_) | Value::Number(_) | Value::Bool(_)));
        if !scalars {
            return RawValue::Unsupported(Value::Array(items));
        }

        let list = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
        RawValue::StringList(list)
    }

    fn from_object(map: Map<String, Value>) -> Self {
        if let (Some(Value::String(min)), Some(Value::String(max))) = (map.get("min"), map.get("max"))
        {
            return RawValue::RangeBounds {
                min: min.clone(),
                max: max.clone(),
            };
        }
        RawValue::Map(map)
    }

    /// Short shape name for log output.
    pub fn shape(&self) -> &'static str {
        match self {
            RawValue::Literal(_) => "literal",
            RawValue::RangeBounds { .. } => "range",
            RawValue::StringList(_) => "list",
            RawValue::BracketLiteral(_) => "bracket",
            RawValue::Map(_) => "map",
            RawValue::Unsupported(_) => "unsupported",
        }
    }
}

/// An ordered set of raw filter parameters keyed by filter identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    entries: Vec<(FilterKey, RawValue)>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A key given twice keeps only the latest value, the way
    /// form decoding collapses repeated scalar keys.
    pub fn insert(&mut self, key: impl Into<FilterKey>, value: RawValue) {
        let key = key.into();
        self.entries.retain(|(k, _)| k != &key);
        self.entries.push((key, value));
    }

    pub fn with(mut self, key: impl Into<FilterKey>, value: RawValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Decode a JSON object of filter params.
    ///
    /// `null` is treated as "no params". Anything other than an object or
    /// `null` is rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (FilterKey::from(k), RawValue::from_json(v)))
                .collect()),
            other => Err(FilterError::Config(format!(
                "filter params must be an object, got {}",
                other
            ))),
        }
    }

    /// Decode the filter sub-map of a full request params object.
    ///
    /// When `params_key` is missing from the object, the object itself is
    /// taken as the filter params.
    pub fn from_request(value: Value, params_key: &str) -> Result<Self> {
        match value {
            Value::Object(mut map) if map.contains_key(params_key) => {
                Self::from_json(map.remove(params_key).unwrap_or(Value::Null))
            }
            other => Self::from_json(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterKey, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(FilterKey, RawValue)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (FilterKey, RawValue)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
