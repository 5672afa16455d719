//! Encoding live filters into the wire map.
//!
//! The wire map is the flat JSON object a client embeds in a URL or hidden
//! form to reproduce the currently applied filters. Only active filters are
//! written; an empty multi-select or transformer leaves no trace.

use crate::config::SelectNullPolicy;
use crate::hydrate::LiveFilters;
use crate::model::{Bound, Filter, RangeFilter};
use serde_json::{json, Map, Value};

/// Flat wire representation keyed by filter key.
pub type WireMap = Map<String, Value>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub select_null: SelectNullPolicy,
}

/// Encode every active filter. Never fails.
///
/// Entries are inserted in iteration order, so a repeated key keeps the
/// last value written.
pub fn encode(live: &LiveFilters, options: &EncodeOptions) -> WireMap {
    let mut wire = WireMap::new();
    for (key, filter) in live {
        if let Some(value) = encode_filter(filter, options) {
            wire.insert(key.to_string(), value);
        }
    }
    wire
}

/// Wire value for one filter, or `None` if it contributes nothing.
pub fn encode_filter(filter: &Filter, options: &EncodeOptions) -> Option<Value> {
    match filter {
        Filter::Boolean(boolean) => Some(boolean.key().clone()),
        Filter::Range(range) => Some(encode_range(range)),
        Filter::Select(select) => match (select.selected(), options.select_null) {
            (Some(id), _) => Some(json!({ "id": [id] })),
            (None, SelectNullPolicy::Emit) => Some(json!({ "id": null })),
            (None, SelectNullPolicy::Omit) => None,
        },
        Filter::MultiSelect(multi) if !multi.selected().is_empty() => {
            Some(json!({ "selected": multi.selected() }))
        }
        Filter::Transformer(transformer) if !transformer.applied_data().is_empty() => {
            Some(Value::Object(transformer.applied_data().clone()))
        }
        Filter::MultiSelect(_) | Filter::Transformer(_) => None,
    }
}

fn encode_range(range: &RangeFilter) -> Value {
    json!({
        "min": encode_bound(range.current_min()),
        "max": encode_bound(range.current_max()),
    })
}

fn encode_bound(bound: Option<&Bound>) -> Value {
    match bound {
        None => Value::Null,
        Some(Bound::Number(n)) => Value::Number(n.clone()),
        Some(Bound::Date(d)) => Value::String(d.format(DATE_FORMAT).to_string()),
        Some(Bound::DateTime(dt)) => Value::String(dt.format(DATETIME_FORMAT).to_string()),
    }
}
