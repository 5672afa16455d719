//! Filter kinds and their runtime representation.
//!
//! A [`Filter`] plays two roles. Stored in a [`Registry`](crate::registry::Registry)
//! it is a *descriptor*: the static definition of a filter with nothing selected.
//! Cloned out of the registry and given a selection it becomes a *live instance*,
//! which is what the encoder consumes.
//!
//! Identity fields (`field`, range `type`, the boolean `key`, options) are private
//! and only set at construction. The only way to change a filter afterwards is
//! through its `with_*` selection methods, so a live instance always carries the
//! same identity as the descriptor it came from.
//!
//! ## Kinds
//!
//! | Kind | Identity | Selection |
//! |------|----------|-----------|
//! | `Boolean` | `field`, `key` | none (presence = active) |
//! | `Range` | `field`, `type` | `current_min`, `current_max` |
//! | `Select` | `field`, `options` | `selected` |
//! | `MultiSelect` | `field`, `options` | `selected` |
//! | `Transformer` | `transformer` | `applied_data` |

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Borrow;
use std::fmt;

/// Symbolic identifier of a filter.
///
/// Text keys coming off the wire convert into this with `From`, and lookups
/// accept plain `&str` through `Borrow<str>`, so `"status"` and
/// `FilterKey::from("status")` always address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterKey(String);

impl FilterKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FilterKey {
    fn from(key: &str) -> Self {
        FilterKey(key.to_string())
    }
}

impl From<String> for FilterKey {
    fn from(key: String) -> Self {
        FilterKey(key)
    }
}

impl From<&FilterKey> for FilterKey {
    fn from(key: &FilterKey) -> Self {
        key.clone()
    }
}

impl AsRef<str> for FilterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FilterKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of a filter, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Boolean,
    Range,
    Select,
    MultiSelect,
    Transformer,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Boolean => "boolean",
            FilterKind::Range => "range",
            FilterKind::Select => "select",
            FilterKind::MultiSelect => "multi_select",
            FilterKind::Transformer => "transformer",
        };
        f.write_str(name)
    }
}

/// Value type of a range filter's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    Number,
    Date,
    DateTime,
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RangeType::Number => "number",
            RangeType::Date => "date",
            RangeType::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// A parsed range bound.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Number(Number),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// One choice offered by a select or multi-select filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A filter descriptor or live filter instance.
///
/// Serialized with an internal `kind` tag; selection fields are never
/// serialized, so a config file only ever describes descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    Boolean(BooleanFilter),
    Range(RangeFilter),
    Select(SelectFilter),
    MultiSelect(MultiSelectFilter),
    Transformer(TransformerFilter),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Boolean(_) => FilterKind::Boolean,
            Filter::Range(_) => FilterKind::Range,
            Filter::Select(_) => FilterKind::Select,
            Filter::MultiSelect(_) => FilterKind::MultiSelect,
            Filter::Transformer(_) => FilterKind::Transformer,
        }
    }

    /// Target attribute, if the kind has one. Transformers don't.
    pub fn field(&self) -> Option<&str> {
        match self {
            Filter::Boolean(f) => Some(&f.field),
            Filter::Range(f) => Some(&f.field),
            Filter::Select(f) => Some(&f.field),
            Filter::MultiSelect(f) => Some(&f.field),
            Filter::Transformer(_) => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Filter::Boolean(f) => f.label.as_deref(),
            Filter::Range(f) => f.label.as_deref(),
            Filter::Select(f) => f.label.as_deref(),
            Filter::MultiSelect(f) => f.label.as_deref(),
            Filter::Transformer(f) => f.label.as_deref(),
        }
    }
}

/// Presence-toggled filter that applies `key` to `field` when active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanFilter {
    field: String,
    key: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl BooleanFilter {
    pub fn new(field: impl Into<String>, key: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            key: key.into(),
            label: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The value written into state (and onto the wire) while active.
    pub fn key(&self) -> &Value {
        &self.key
    }
}

/// Min/max filter over numbers, dates or naive date-times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    field: String,
    #[serde(rename = "type")]
    range_type: RangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    /// Lower bound used when the submitted minimum is blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_min: Option<Value>,
    /// Upper bound used when the submitted maximum is blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_max: Option<Value>,
    #[serde(skip)]
    current_min: Option<Bound>,
    #[serde(skip)]
    current_max: Option<Bound>,
}

impl RangeFilter {
    pub fn new(field: impl Into<String>, range_type: RangeType) -> Self {
        Self {
            field: field.into(),
            range_type,
            label: None,
            default_min: None,
            default_max: None,
            current_min: None,
            current_max: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn defaults(mut self, min: Option<Value>, max: Option<Value>) -> Self {
        self.default_min = min;
        self.default_max = max;
        self
    }

    pub fn with_bounds(mut self, min: Option<Bound>, max: Option<Bound>) -> Self {
        self.current_min = min;
        self.current_max = max;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn range_type(&self) -> RangeType {
        self.range_type
    }

    pub fn default_min(&self) -> Option<&Value> {
        self.default_min.as_ref()
    }

    pub fn default_max(&self) -> Option<&Value> {
        self.default_max.as_ref()
    }

    pub fn current_min(&self) -> Option<&Bound> {
        self.current_min.as_ref()
    }

    pub fn current_max(&self) -> Option<&Bound> {
        self.current_max.as_ref()
    }
}

/// Single-choice filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectFilter {
    field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<SelectOption>,
    #[serde(skip)]
    selected: Option<Value>,
}

impl SelectFilter {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: None,
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_selected(mut self, selected: Option<Value>) -> Self {
        self.selected = selected;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn choices(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&Value> {
        self.selected.as_ref()
    }
}

/// Multiple-choice filter. An empty selection means inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSelectFilter {
    field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<SelectOption>,
    #[serde(skip)]
    selected: Vec<Value>,
}

impl MultiSelectFilter {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: None,
            options: Vec::new(),
            selected: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_selected(mut self, selected: Vec<Value>) -> Self {
        self.selected = selected;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn choices(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &[Value] {
        &self.selected
    }
}

/// Custom filter whose data is handed verbatim to a named query transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerFilter {
    transformer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip)]
    applied_data: Map<String, Value>,
}

impl TransformerFilter {
    pub fn new(transformer: impl Into<String>) -> Self {
        Self {
            transformer: transformer.into(),
            label: None,
            applied_data: Map::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_applied_data(mut self, applied_data: Map<String, Value>) -> Self {
        self.applied_data = applied_data;
        self
    }

    /// Name of the query-building collaborator that consumes `applied_data`.
    pub fn transformer(&self) -> &str {
        &self.transformer
    }

    pub fn applied_data(&self) -> &Map<String, Value> {
        &self.applied_data
    }
}

impl From<BooleanFilter> for Filter {
    fn from(f: BooleanFilter) -> Self {
        Filter::Boolean(f)
    }
}

impl From<RangeFilter> for Filter {
    fn from(f: RangeFilter) -> Self {
        Filter::Range(f)
    }
}

impl From<SelectFilter> for Filter {
    fn from(f: SelectFilter) -> Self {
        Filter::Select(f)
    }
}

impl From<MultiSelectFilter> for Filter {
    fn from(f: MultiSelectFilter) -> Self {
        Filter::MultiSelect(f)
    }
}

impl From<TransformerFilter> for Filter {
    fn from(f: TransformerFilter) -> Self {
        Filter::Transformer(f)
    }
}
