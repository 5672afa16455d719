//! Normalized filter state.
//!
//! The state is what a merge produces and what a caller stores between
//! requests: one [`Selection`] payload per active filter key. A key that is
//! absent means the filter is inactive.

use crate::model::FilterKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The stored selection of one active filter.
///
/// Serializes to the same shapes the merge writes: `{"min", "max"}`,
/// `{"id": [...]}`, `{"selected": [...]}`, a custom map, or the boolean
/// filter's key value. Deserialization tries those shapes in that order, so a
/// custom map with exactly `min`/`max` strings, an `id` list or a `selected`
/// list reads back as one of the select payloads; [`Selection::to_map`] undoes
/// that for transformer filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Range(RangeSelection),
    Select(SelectSelection),
    MultiSelect(MultiSelection),
    Custom(Map<String, Value>),
    Flag(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeSelection {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectSelection {
    pub id: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiSelection {
    pub selected: Vec<Value>,
}

impl Selection {
    pub fn flag(key: Value) -> Self {
        Selection::Flag(key)
    }

    pub fn range(min: impl Into<String>, max: impl Into<String>) -> Self {
        Selection::Range(RangeSelection {
            min: min.into(),
            max: max.into(),
        })
    }

    pub fn select(id: Value) -> Self {
        Selection::Select(SelectSelection { id: vec![id] })
    }

    pub fn multi_select(selected: Vec<Value>) -> Self {
        Selection::MultiSelect(MultiSelection { selected })
    }

    pub fn custom(data: Map<String, Value>) -> Self {
        Selection::Custom(data)
    }

    /// The selection as the JSON object it was read from, or `None` for a
    /// scalar flag.
    ///
    /// A transformer's data may happen to look like a range, select or
    /// multi-select payload; this recovers the original map either way.
    pub fn to_map(&self) -> Option<Map<String, Value>> {
        let mut map = Map::new();
        match self {
            Selection::Range(range) => {
                map.insert("min".into(), Value::String(range.min.clone()));
                map.insert("max".into(), Value::String(range.max.clone()));
            }
            Selection::Select(select) => {
                map.insert("id".into(), Value::Array(select.id.clone()));
            }
            Selection::MultiSelect(multi) => {
                map.insert("selected".into(), Value::Array(multi.selected.clone()));
            }
            Selection::Custom(data) => return Some(data.clone()),
            Selection::Flag(_) => return None,
        }
        Some(map)
    }
}

/// Active filters keyed by filter key.
pub type FilterState = BTreeMap<FilterKey, Selection>;

/// The table options a merge operates on.
///
/// Only `filters` is touched by this crate; sibling entries such as sort or
/// pagination ride along unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    #[serde(default)]
    pub filters: FilterState,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl TableOptions {
    pub fn with_filters(filters: FilterState) -> Self {
        Self {
            filters,
            rest: Map::new(),
        }
    }
}
